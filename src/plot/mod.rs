// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to plot uv coverage. Plotting is an optional feature, because the
//! fonts it needs are a system dependency.

mod error;

pub use error::PlotError;

use std::path::Path;

use crate::uvw::UvwCoverage;

/// Plot the (u,v) points of `coverage` [km] in blue and their conjugates in
/// red, saving the image to `file`.
#[cfg(not(feature = "plotting"))]
pub fn plot_uv_coverage(_coverage: &UvwCoverage, _file: &Path) -> Result<(), PlotError> {
    Err(PlotError::NoPlottingFeature)
}

/// Plot the (u,v) points of `coverage` [km] in blue and their conjugates in
/// red, saving the image to `file`.
#[cfg(feature = "plotting")]
pub fn plot_uv_coverage(coverage: &UvwCoverage, file: &Path) -> Result<(), PlotError> {
    plotting::plot_uv_coverage(coverage, file)
}

#[cfg(feature = "plotting")]
mod plotting {
    use log::debug;
    use plotters::prelude::*;

    use super::*;

    /// The number of pixels along each side of the plot.
    const PIXELS: u32 = 1600;

    fn draw_err<E: std::fmt::Display>(e: E) -> PlotError {
        PlotError::Draw(e.to_string())
    }

    pub(super) fn plot_uv_coverage(coverage: &UvwCoverage, file: &Path) -> Result<(), PlotError> {
        debug!("Plotting uv coverage to {}", file.display());
        let root = BitMapBackend::new(file, (PIXELS, PIXELS)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let limit = match coverage.summary.max_uv_baseline_m / 1e3 * 1.05 {
            l if l > 0.0 => l,
            _ => 1.0,
        };
        let mut cc = ChartBuilder::on(&root)
            .caption("uv coverage", ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(-limit..limit, -limit..limit)
            .map_err(draw_err)?;
        cc.configure_mesh()
            .x_desc("u [km]")
            .y_desc("v [km]")
            .light_line_style(WHITE)
            .draw()
            .map_err(draw_err)?;

        for (points, colour) in [
            (coverage.uvws.clone(), BLUE),
            (coverage.conjugates().collect(), RED),
        ] {
            cc.draw_series(PointSeries::of_element(
                points.iter().map(|uvw| (uvw.u / 1e3, uvw.v / 1e3)),
                1,
                ShapeStyle::from(&colour).filled(),
                &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
            ))
            .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}
