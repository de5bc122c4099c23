// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that are ready to be used directly.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and validated.

mod error;
#[cfg(test)]
mod tests;

pub use error::UvgenRunError;

use std::path::PathBuf;

use hifitime::Epoch;
use log::{debug, info};
use marlu::LatLngHeight;

use crate::{
    cli::InfoPrinter,
    constants::{PI, SIDEREAL_RATE_RAD_PER_SEC},
    coord::CoordinateTransformer,
    direction::PointingDirection,
    geometry::ObservationGeometry,
    io::{write_uvw_text, AntennaTable},
    measures::Measures,
    plot::plot_uv_coverage,
    uvw::{compute_uvw, UvwCoverage},
};

/// Everything needed to generate (u,v,w) coverage.
#[derive(Debug, Clone)]
pub struct UvgenParams {
    /// The antennas, in the coordinate system of their table.
    pub antennas: AntennaTable,

    /// The Earth position of the array; ENU antenna offsets are relative to
    /// this.
    pub observer: LatLngHeight,

    pub direction: PointingDirection,

    /// The transit nearest to this epoch is the centre of the synthesis.
    pub reference_epoch: Epoch,

    /// [hours]
    pub synthesis_hours: f64,

    /// [seconds]
    pub integration_time_s: f64,

    /// The geodetic and sidereal-time services.
    pub measures: Measures,

    pub outfile: PathBuf,

    /// Where to save a plot of the uv coverage, if anywhere.
    pub savefig: Option<PathBuf>,
}

impl UvgenParams {
    /// The hour-angle range of the synthesis [radians], centred on zero.
    pub fn hour_angle_range(&self) -> (f64, f64) {
        let half = self.synthesis_hours / 2.0 * PI / 12.0;
        (-half, half)
    }

    /// Generate the (u,v,w) coverage, write it out and (optionally) plot it.
    pub fn run(&self) -> Result<UvwCoverage, UvgenRunError> {
        let transformer = CoordinateTransformer::new(&self.measures);
        let xyzs = self.antennas.clone().into_itrf(&transformer, self.observer);
        debug!("Normalised {} antennas to ITRF", xyzs.len());

        let window = ObservationGeometry::new(&self.measures).visibility_window(
            self.observer,
            &self.direction,
            self.reference_epoch,
        );

        let coverage = compute_uvw(
            &xyzs,
            &self.direction,
            &window,
            self.hour_angle_range(),
            self.integration_time_s * SIDEREAL_RATE_RAD_PER_SEC,
        )?;

        let header = coverage.summary.header_lines();
        let mut printer = InfoPrinter::new("Coverage".into());
        printer.push_block(header.iter().skip(1).cloned().map(Into::into).collect());
        printer.push_line(
            format!(
                "{} baselines x {} time samples",
                coverage.num_baselines,
                coverage.num_times()
            )
            .into(),
        );
        printer.display();

        write_uvw_text(&self.outfile, &coverage.uvws, &header)?;
        info!("Wrote (u,v,w) samples to {}", self.outfile.display());

        if let Some(savefig) = &self.savefig {
            plot_uv_coverage(&coverage, savefig)?;
            info!("Saved uv-coverage plot to {}", savefig.display());
        }

        Ok(coverage)
    }
}
