// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use thiserror::Error;

use crate::unit_parsing::UnitParseError;

#[derive(Error, Debug)]
pub(crate) enum UvgenArgsError {
    #[error("No antenna table was supplied")]
    NoAntennas,

    #[error("Antenna table '{0}' doesn't exist")]
    AntennasDoesntExist(Box<Path>),

    #[error("No pointing direction was supplied")]
    NoDirection,

    #[error("Couldn't parse start time '{input}' as \"yyyy/mm/dd hh:mm:ss\" (UTC): {err}")]
    BadStartTime { input: String, err: String },

    #[error("The synthesis time must be positive and finite, but got {0} hours")]
    NonPositiveSynthesis(f64),

    #[error("The integration time must be positive and finite, but got {0} seconds")]
    NonPositiveDtime(f64),

    #[error("Couldn't parse the integration time: {0}")]
    Dtime(#[from] UnitParseError),

    #[error("Couldn't read the system clock to get today's date: {0}")]
    NoSystemTime(String),
}
