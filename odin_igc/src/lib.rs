/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{fmt, path::Path};
use serde::Serialize;
use tracing::{debug,info};

pub mod errors;
use errors::Result;

pub mod config;
pub use config::FlightConfig;

pub mod fix;
pub use fix::{Fix, FlightMetadata, AltitudeSource};

pub mod signal;
use signal::derive_signals;

pub mod viterbi;

pub mod classify;
pub use classify::{FlightMode, TrackMode, FlightPick, AirborneWindow};
use classify::{classify_moving, classify_circling, airborne_window};

pub mod segment;
pub use segment::{Thermal, Glide};

pub mod validate;
pub use validate::{Anomaly, Verdict};
use validate::{check_altitude, select_altitude_source, validate};

pub mod igc;
pub mod task;

/// an analyzed flight. All derived fields are computed by [`Flight::analyze`] in a fixed order
/// (signals, altitude source, moving classification, circling classification, segmentation, validation)
/// and are read-only afterwards. Invalid flights still carry all partial results
#[derive(Debug,Clone,Serialize)]
pub struct Flight {
    metadata: FlightMetadata,
    fixes: Vec<Fix>,
    flight_modes: Vec<FlightMode>,
    track_modes: Vec<TrackMode>,
    window: Option<AirborneWindow>,
    alt_source: AltitudeSource,
    thermals: Vec<Thermal>,
    glides: Vec<Glide>,
    verdict: Verdict,
    notes: Vec<String>,
}

impl Flight {
    /// run the analysis pipeline. This never fails - anomalies of the recording end up in the verdict
    pub fn analyze (fixes: Vec<Fix>, metadata: FlightMetadata, config: &FlightConfig)->Flight {
        let mut notes: Vec<String> = Vec::new();

        let signals = derive_signals( &fixes, config.min_bearing_interval);
        debug!("{} fixes, {} invalid samples", fixes.len(), signals.invalid_samples());

        let press = check_altitude( &fixes, AltitudeSource::Pressure, config);
        let gnss = check_altitude( &fixes, AltitudeSource::Gnss, config);
        let alt_source = select_altitude_source( &press, &gnss, &mut notes);

        let flight_modes = classify_moving( &fixes, &signals, config);
        let window = airborne_window( &flight_modes, config.which_flight);
        match window {
            Some(w) => {
                debug!("airborne window {}", w);
                if w.open_landing { notes.push( "no landing detected, flight ends with last fix".to_string()) }
            }
            None => debug!("no takeoff")
        }

        let track_modes = classify_circling( &signals, &flight_modes, window, config);
        let segments = segment::segment( &fixes, &track_modes, window, alt_source, config.min_segment_fixes, config.min_thermal_duration);
        debug!("{} thermals, {} glides", segments.thermals.len(), segments.glides.len());

        let verdict = validate( &fixes, &signals, window, &press, &gnss, config, &mut notes);
        if !verdict.valid {
            info!("invalid flight: {}", verdict);
        }

        Flight {
            metadata,
            fixes,
            flight_modes,
            track_modes: segments.track_modes,
            window,
            alt_source,
            thermals: segments.thermals,
            glides: segments.glides,
            verdict,
            notes,
        }
    }

    pub fn from_igc_file<P: AsRef<Path>> (path: P, config: &FlightConfig)->Result<Flight> {
        let log = igc::read_igc_file( path)?;
        Ok( Flight::analyze( log.fixes, log.metadata, config))
    }

    pub fn from_igc_str (input: &str, config: &FlightConfig)->Result<Flight> {
        let log = igc::read_igc_str( input)?;
        Ok( Flight::analyze( log.fixes, log.metadata, config))
    }

    pub fn metadata (&self)->&FlightMetadata { &self.metadata }
    pub fn fixes (&self)->&[Fix] { self.fixes.as_slice() }
    pub fn flight_modes (&self)->&[FlightMode] { self.flight_modes.as_slice() }
    pub fn track_modes (&self)->&[TrackMode] { self.track_modes.as_slice() }
    pub fn airborne_window (&self)->Option<AirborneWindow> { self.window }
    pub fn takeoff (&self)->Option<usize> { self.window.map( |w| w.takeoff) }
    pub fn landing (&self)->Option<usize> { self.window.map( |w| w.landing) }
    pub fn alt_source (&self)->AltitudeSource { self.alt_source }
    pub fn thermals (&self)->&[Thermal] { self.thermals.as_slice() }
    pub fn glides (&self)->&[Glide] { self.glides.as_slice() }
    pub fn verdict (&self)->Verdict { self.verdict }
    pub fn is_valid (&self)->bool { self.verdict.valid }
    pub fn notes (&self)->&[String] { self.notes.as_slice() }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flight({}, fixes: {}, thermals: {}, glides: {})", self.verdict, self.fixes.len(), self.thermals.len(), self.glides.len())
    }
}
