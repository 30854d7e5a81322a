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

use std::fmt;
use chrono::{DateTime,NaiveDate,Utc};
use serde::{Serialize,Deserialize};
use odin_common::{geo::GeoPoint, is_none};

/// a single position report of a flight recorder. Fixes are created once by the reader (or a test
/// track builder) and never mutated afterwards
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Fix {
    pub timestamp: DateTime<Utc>,
    pub lat: f64,       // degrees
    pub lon: f64,       // degrees
    pub gnss_alt: f64,  // meters
    pub press_alt: f64, // meters
}

impl Fix {
    pub fn new (timestamp: DateTime<Utc>, lat: f64, lon: f64, gnss_alt: f64, press_alt: f64)->Self {
        Fix { timestamp, lat, lon, gnss_alt, press_alt }
    }

    #[inline]
    pub fn position (&self)->GeoPoint { GeoPoint::from_lat_lon_degrees( self.lat, self.lon) }

    #[inline]
    pub fn altitude (&self, source: AltitudeSource)->f64 {
        match source {
            AltitudeSource::Pressure => self.press_alt,
            AltitudeSource::Gnss => self.gnss_alt
        }
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fix({} [{:.5},{:.5}] gnss={:.0}m press={:.0}m)", self.timestamp.format("%H:%M:%S"), self.lat, self.lon, self.gnss_alt, self.press_alt)
    }
}

/// which of the two altitude sensors of a recorder is used to compute altitude changes
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum AltitudeSource {
    Pressure,
    Gnss
}

impl fmt::Display for AltitudeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltitudeSource::Pressure => write!(f, "pressure"),
            AltitudeSource::Gnss => write!(f, "gnss")
        }
    }
}

/// file level information about a recording. All fields are optional since recorders
/// differ widely in what they report
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct FlightMetadata {
    #[serde(skip_serializing_if="is_none")] pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if="is_none")] pub pilot: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub glider_type: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub competition_class: Option<String>,

    // flight recorder
    #[serde(skip_serializing_if="is_none")] pub fr_manuf_code: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub fr_uniq_id: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub fr_firmware_version: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub fr_hardware_version: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub fr_recorder_type: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub fr_gps_receiver: Option<String>,
    #[serde(skip_serializing_if="is_none")] pub fr_pressure_sensor: Option<String>,

    /// B record extension declarations
    #[serde(skip_serializing_if="is_none")] pub i_record: Option<String>,
}
