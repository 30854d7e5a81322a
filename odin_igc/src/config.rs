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

use std::{path::Path, time::Duration};
use serde::{Serialize,Deserialize};
use odin_common::{datetime::{secs, ser_duration_as_fractional_secs, de_duration_from_fractional_secs}, fs::filepath_contents_as_string};

use crate::classify::FlightPick;
use crate::errors::Result;

/// the tunables of the analysis pipeline. Each value affects exactly one classification or validation step.
/// All fields have defaults so that config files only need to contain what differs. Durations are given as
/// fractional seconds, speeds in km/h, altitudes in meters
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    //--- moving classification
    pub min_ground_speed: f64, // below this we are not moving
    pub moving_mismatch_cost: f64,
    pub moving_switch_cost: f64,
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub min_landing_time: Duration, // shorter stationary periods between moving periods do not count as landing
    pub which_flight: FlightPick,

    //--- circling classification
    pub min_bearing_rate: f64, // deg/s, above this we are circling
    pub min_bearing_interval: f64, // seconds, look-back for bearing rates
    pub circling_mismatch_cost: f64,
    pub circling_switch_cost: f64,

    //--- segmentation
    pub min_segment_fixes: usize, // noise floor
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub min_thermal_duration: Duration,

    //--- validation
    pub min_fixes: usize,
    pub min_seconds_between_fixes: f64,
    pub max_time_violations: usize,
    pub max_new_days: usize, // UTC midnight crossings within one log
    pub max_ground_speed: f64,
    pub max_speed_violations: usize,
    pub max_alt_change_rate: f64, // m/s
    pub max_alt_change_violations: usize,
    pub min_alt: f64,
    pub max_alt: f64,
    pub min_avg_abs_alt_change: f64, // below this an altitude sensor is considered to be flat-lined
    pub max_seconds_between_fixes: f64,
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub max_gap: Duration,
}

impl Default for FlightConfig {
    fn default()->Self {
        FlightConfig {
            min_ground_speed: 15.0,
            moving_mismatch_cost: 1.386,
            moving_switch_cost: 7.6,
            min_landing_time: secs(300),
            which_flight: FlightPick::Concat,

            min_bearing_rate: 6.0,
            min_bearing_interval: 0.0,
            circling_mismatch_cost: 2.5,
            circling_switch_cost: 3.7,

            min_segment_fixes: 5,
            min_thermal_duration: secs(60),

            min_fixes: 50,
            min_seconds_between_fixes: 1.0,
            max_time_violations: 10,
            max_new_days: 2,
            max_ground_speed: 500.0,
            max_speed_violations: 3,
            max_alt_change_rate: 50.0,
            max_alt_change_violations: 3,
            min_alt: -600.0,
            max_alt: 10000.0,
            min_avg_abs_alt_change: 0.01,
            max_seconds_between_fixes: 50.0,
            max_gap: secs(1800),
        }
    }
}

impl FlightConfig {
    pub fn from_ron_str (s: &str)->Result<Self> {
        Ok( ron::from_str(s)? )
    }

    pub fn from_ron_file<P: AsRef<Path>> (path: P)->Result<Self> {
        let s = filepath_contents_as_string( &path)?;
        Self::from_ron_str( &s)
    }
}
