// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Generate the (u,v,w) coverage of an array from its antenna positions.

mod error;
#[cfg(test)]
mod tests;

pub(crate) use error::UvgenArgsError;

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use clap::Parser;
use console::style;
use hifitime::{Duration, Epoch};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, Warn, ARG_FILE_HELP};
use crate::{
    constants::{DEFAULT_DTIME_SECONDS, DEFAULT_OUTPUT_FILENAME, DEFAULT_SYNTHESIS_HOURS},
    direction::PointingDirection,
    geometry::resolve_observer,
    io::{
        can_write_to_file, read_antenna_table, AntennaCoordSys, ANTENNA_COORD_SYS_COMMA_SEPARATED,
    },
    measures::Measures,
    params::UvgenParams,
    unit_parsing::{parse_time, TimeFormat},
    UvgenError,
};

const DEFAULT_COORD_SYS: AntennaCoordSys = AntennaCoordSys::Enu;

/// The format of start times, which are always UTC.
const START_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const START_DATE_FORMAT: &str = "%Y/%m/%d";

lazy_static::lazy_static! {
    static ref COORD_SYS_HELP: String =
        format!("The coordinate system of the antenna positions. Supported systems: {}. Default: {DEFAULT_COORD_SYS}", *ANTENNA_COORD_SYS_COMMA_SEPARATED);

    static ref SYNTHESIS_HELP: String =
        format!("The synthesis time [hours], centred on the transit of the pointing centre. Default: {DEFAULT_SYNTHESIS_HOURS}");

    static ref DTIME_HELP: String =
        format!("The integration time. Units may be given (e.g. 2min); without units, seconds are assumed. Default: {DEFAULT_DTIME_SECONDS}s");

    static ref OUTFILE_HELP: String =
        format!("Save the (u,v,w) samples here. Default: {DEFAULT_OUTPUT_FILENAME}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct UvwCliArgs {
    /// Path to the antenna table.
    #[clap(short, long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) antennas: Option<PathBuf>,

    #[clap(long, help = COORD_SYS_HELP.as_str(), help_heading = "INPUT FILES")]
    pub(super) coord_sys: Option<String>,

    /// The antenna table has no third (up) column, i.e. rows are
    /// "x y [dish_diameter station mount]"; all antennas are put on the plane
    /// of the array.
    #[clap(long, help_heading = "INPUT FILES")]
    #[serde(default)]
    pub(super) noup: bool,

    /// The longitude of the array [degrees]. Required if --tel isn't given.
    #[clap(long, allow_hyphen_values = true, help_heading = "ARRAY POSITION")]
    pub(super) lon: Option<f64>,

    /// The latitude of the array [degrees]. Required if --tel isn't given.
    #[clap(long, allow_hyphen_values = true, help_heading = "ARRAY POSITION")]
    pub(super) lat: Option<f64>,

    /// The height of the array [metres]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "ARRAY POSITION")]
    pub(super) height: Option<f64>,

    /// The name of a known telescope to get the array position from. This
    /// takes precedence over --lon and --lat.
    #[clap(short = 'T', long, help_heading = "ARRAY POSITION")]
    pub(super) tel: Option<String>,

    /// The pointing direction as "<frame>,<RA>,<Dec>", e.g.
    /// "J2000,0deg,-30deg".
    #[clap(short, long, allow_hyphen_values = true, help_heading = "OBSERVATION PARAMETERS")]
    pub(super) direction: Option<String>,

    #[clap(long, help = SYNTHESIS_HELP.as_str(), help_heading = "OBSERVATION PARAMETERS")]
    pub(super) synthesis: Option<f64>,

    #[clap(long, help = DTIME_HELP.as_str(), help_heading = "OBSERVATION PARAMETERS")]
    pub(super) dtime: Option<String>,

    /// The synthesis is centred on the transit nearest to this time, given as
    /// "yyyy/mm/dd hh:mm:ss" (UTC). Default: the start of today (UTC)
    #[clap(long, help_heading = "OBSERVATION PARAMETERS")]
    pub(super) start_time: Option<String>,

    /// Use this value as the DUT1 [seconds]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "OBSERVATION PARAMETERS")]
    pub(super) dut1: Option<f64>,

    #[clap(short, long, help = OUTFILE_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) outfile: Option<PathBuf>,

    /// Save a plot of the uv coverage here. Only available if compiled with
    /// the "plotting" feature.
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) savefig: Option<PathBuf>,
}

impl UvwCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            antennas: self.antennas.or(other.antennas),
            coord_sys: self.coord_sys.or(other.coord_sys),
            noup: self.noup || other.noup,
            lon: self.lon.or(other.lon),
            lat: self.lat.or(other.lat),
            height: self.height.or(other.height),
            tel: self.tel.or(other.tel),
            direction: self.direction.or(other.direction),
            synthesis: self.synthesis.or(other.synthesis),
            dtime: self.dtime.or(other.dtime),
            start_time: self.start_time.or(other.start_time),
            dut1: self.dut1.or(other.dut1),
            outfile: self.outfile.or(other.outfile),
            savefig: self.savefig.or(other.savefig),
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct UvwArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "uvw")]
    #[serde(default)]
    pub(super) uvw_args: UvwCliArgs,
}

impl UvwArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<UvwArgs, UvgenError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let UvwArgs {
                args_file: _,
                uvw_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(UvwArgs {
                args_file: None,
                uvw_args: cli_args.uvw_args.merge(uvw_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<UvgenParams, UvgenError> {
        debug!("{:#?}", self);

        // Expose all the struct fields to ensure they're all used.
        let UvwArgs {
            args_file: _,
            uvw_args:
                UvwCliArgs {
                    antennas,
                    coord_sys,
                    noup,
                    lon,
                    lat,
                    height,
                    tel,
                    direction,
                    synthesis,
                    dtime,
                    start_time,
                    dut1,
                    outfile,
                    savefig,
                },
        } = self;

        // Configuration problems are found before any file is read.
        let measures = Measures::new(Duration::from_seconds(dut1.unwrap_or_default()));
        if tel.is_some() && (lon.is_some() || lat.is_some()) {
            "A telescope name was given; ignoring --lon and --lat".warn();
        }
        let observer = resolve_observer(&measures, tel.as_deref(), lon, lat, height)?;
        let direction: PointingDirection = direction.ok_or(UvgenArgsError::NoDirection)?.parse()?;
        let coord_sys = match coord_sys {
            Some(s) => AntennaCoordSys::parse(&s)?,
            None => DEFAULT_COORD_SYS,
        };

        let synthesis_hours = synthesis.unwrap_or(DEFAULT_SYNTHESIS_HOURS);
        if !synthesis_hours.is_finite() || synthesis_hours <= 0.0 {
            return Err(UvgenArgsError::NonPositiveSynthesis(synthesis_hours).into());
        }
        let integration_time_s = match dtime {
            Some(s) => parse_time(&s)
                .map_err(UvgenArgsError::from)?
                .to_seconds(TimeFormat::S),
            None => DEFAULT_DTIME_SECONDS,
        };
        if !integration_time_s.is_finite() || integration_time_s <= 0.0 {
            return Err(UvgenArgsError::NonPositiveDtime(integration_time_s).into());
        }
        let reference_epoch = match start_time {
            Some(s) => parse_start_time(&s)?,
            None => start_of_today()?,
        };

        let antennas_file = antennas.ok_or(UvgenArgsError::NoAntennas)?;
        if !antennas_file.exists() {
            return Err(UvgenArgsError::AntennasDoesntExist(antennas_file.into_boxed_path()).into());
        }
        let antennas = read_antenna_table(&antennas_file, coord_sys, noup)?;
        if noup && coord_sys != AntennaCoordSys::Enu {
            format!("--noup with {coord_sys} positions sets the third coordinate of every antenna to 0").warn();
        }

        let outfile = outfile.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME));
        can_write_to_file(&outfile)?;
        if let Some(savefig) = &savefig {
            can_write_to_file(savefig)?;
        }

        let mut antenna_printer = InfoPrinter::new(
            format!("Generating (u,v,w) for {} antennas", antennas.len()).into(),
        );
        antenna_printer.push_line(format!("from {}", antennas_file.display()).into());
        antenna_printer.push_block(vec![
            format!(
                "Coordinate system: {coord_sys}{}",
                if noup { " (no up)" } else { "" }
            )
            .into(),
            format!(
                "Metadata columns: {}",
                if antennas.metadata.is_some() { "yes" } else { "no" }
            )
            .into(),
        ]);
        antenna_printer.display();

        let mut coord_printer = InfoPrinter::new("Coordinates".into());
        coord_printer.push_block(vec![
            style("                   Longitude Latitude  Height")
                .bold()
                .to_string()
                .into(),
            format!(
                "Array position:    {:>9.4}° {:>8.4}° {:.2}m{}",
                observer.longitude_rad.to_degrees(),
                observer.latitude_rad.to_degrees(),
                observer.height_metres,
                tel.as_ref().map(|t| format!(" ({t})")).unwrap_or_default()
            )
            .into(),
        ]);
        coord_printer.push_line(format!("Pointing centre:   {direction}").into());
        coord_printer.display();

        let mut time_printer = InfoPrinter::new("Time info".into());
        time_printer.push_block(vec![
            format!("Reference epoch: {reference_epoch}").into(),
            format!("Synthesis time: {synthesis_hours} hours").into(),
            format!("Integration time: {integration_time_s} s").into(),
        ]);
        time_printer.push_line(format!("DUT1: {:.10} s", measures.dut1.to_seconds()).into());
        time_printer.display();

        display_warnings();

        Ok(UvgenParams {
            antennas,
            observer,
            direction,
            reference_epoch,
            synthesis_hours,
            integration_time_s,
            measures,
            outfile,
            savefig,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), UvgenError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

/// Parse a UTC start time, e.g. "2022/06/01 12:30:00". The time of day may be
/// left off, meaning the start of that day.
fn parse_start_time(s: &str) -> Result<Epoch, UvgenArgsError> {
    let s = s.trim();
    match NaiveDateTime::parse_from_str(s, START_TIME_FORMAT) {
        Ok(dt) => Ok(Epoch::from_gregorian_utc(
            dt.year(),
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
            0,
        )),
        Err(err) => match NaiveDate::parse_from_str(s, START_DATE_FORMAT) {
            Ok(d) => Ok(Epoch::from_gregorian_utc_at_midnight(
                d.year(),
                d.month() as u8,
                d.day() as u8,
            )),
            Err(_) => Err(UvgenArgsError::BadStartTime {
                input: s.to_string(),
                err: err.to_string(),
            }),
        },
    }
}

/// The start of today (UTC).
fn start_of_today() -> Result<Epoch, UvgenArgsError> {
    let now = Epoch::now().map_err(|e| UvgenArgsError::NoSystemTime(e.to_string()))?;
    let (year, month, day, ..) = now.to_gregorian_utc();
    Ok(Epoch::from_gregorian_utc_at_midnight(year, month, day))
}
