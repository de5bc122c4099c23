// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Both a longitude and a latitude, or a telescope name, must be specified")]
    NoObserverPosition,

    #[error("Longitude {0}° is not a finite number")]
    LongitudeInvalid(f64),

    #[error("Latitude {0}° is not within -90° to 90°")]
    LatitudeInvalid(f64),

    #[error("{0}")]
    Measures(#[from] crate::measures::MeasuresError),
}
