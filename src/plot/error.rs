// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("uvgen was not compiled with the \"plotting\" feature.\nYou need to compile uvgen from source with this feature to plot uv coverage.")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library: {0}")]
    Draw(String),
}
