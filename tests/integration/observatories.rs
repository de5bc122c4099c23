// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::*;

#[test]
fn test_observatories_lists_meerkat() {
    let cmd = get_cmd().arg("observatories").ok();
    let ok = cmd.is_ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stdout}\n{stderr}");
    assert!(stdout.contains("Known telescopes"));
    assert!(stdout.contains("meerkat"));
    assert!(stdout.contains("mwa"));
    assert!(stdout.contains("-30.7111"));
}
