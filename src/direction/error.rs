// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectionError {
    #[error("Direction '{0}' isn't in the form \"<frame>,<RA>,<Dec>\" (e.g. \"J2000,0deg,-30deg\")")]
    BadFormat(String),

    #[error("Direction frame '{0}' isn't supported; only absolute frames (J2000, ICRS) are")]
    UnsupportedFrame(String),

    #[error("Right ascension {0}° is not a finite number")]
    RaInvalid(f64),

    #[error("Declination {0}° is not within -90° to 90°")]
    DecInvalid(f64),

    #[error("{0}")]
    Measures(#[from] crate::measures::MeasuresError),
}
