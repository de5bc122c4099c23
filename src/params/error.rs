// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UvgenRunError {
    #[error(transparent)]
    Uvw(#[from] crate::uvw::UvwError),

    #[error(transparent)]
    UvwWrite(#[from] crate::io::UvwWriteError),

    #[error(transparent)]
    Plot(#[from] crate::plot::PlotError),
}
