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

/// the two classification passes of a flight. Both use the same generic chain smoother:
///  - moving/stationary from ground speed, over the whole fix sequence (localizes takeoff and landing)
///  - circling/cruising from the absolute bearing rate, restricted to the airborne window

use std::{fmt, time::Duration};
use serde::{Serialize,Deserialize};
use tracing::debug;
use odin_common::datetime::elapsed_secs;

use crate::{fix::Fix, signal::Signals, config::FlightConfig};
use crate::viterbi::{smooth_states, runs, ThresholdCosts, TwoState};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum FlightMode { Stationary, Moving }

impl TwoState for FlightMode {
    const INACTIVE: Self = FlightMode::Stationary;
    const ACTIVE: Self = FlightMode::Moving;
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum TrackMode { Cruising, Circling }

impl TwoState for TrackMode {
    const INACTIVE: Self = TrackMode::Cruising;
    const ACTIVE: Self = TrackMode::Circling;
}

/// which part of a log with several takeoffs and landings is analyzed
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum FlightPick {
    First,  // from the first takeoff to the first landing
    Concat  // from the first takeoff to the last landing
}

/// inclusive fix index range from takeoff to landing
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct AirborneWindow {
    pub takeoff: usize,
    pub landing: usize,
    pub open_landing: bool, // landing is the last fix, not a detected touchdown
}

impl fmt::Display for AirborneWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]{}", self.takeoff, self.landing, if self.open_landing {" (open)"} else {""})
    }
}

pub fn moving_costs (config: &FlightConfig)->ThresholdCosts {
    ThresholdCosts::new( config.min_ground_speed, config.moving_mismatch_cost, config.moving_switch_cost)
}

pub fn circling_costs (config: &FlightConfig)->ThresholdCosts {
    ThresholdCosts::new( config.min_bearing_rate, config.circling_mismatch_cost, config.circling_switch_cost)
}

/// smoothed moving/stationary sequence over all fixes, with short ground stops relabeled as moving
pub fn classify_moving (fixes: &[Fix], signals: &Signals, config: &FlightConfig)->Vec<FlightMode> {
    let mut modes: Vec<FlightMode> = smooth_states( &signals.speed_observations(), &moving_costs(config));
    apply_min_landing_time( fixes, &mut modes, config.min_landing_time);
    modes
}

/// relabel stationary runs that are enclosed by moving runs and last less than `min_landing_time`
/// (measured from their first fix to the next moving fix). Leading and trailing stationary runs stay
pub fn apply_min_landing_time (fixes: &[Fix], modes: &mut [FlightMode], min_landing_time: Duration) {
    let min_secs = min_landing_time.as_secs_f64();

    for (mode, start, end) in runs(modes) {
        if mode == FlightMode::Stationary && start > 0 && end+1 < modes.len() {
            if elapsed_secs( &fixes[start].timestamp, &fixes[end+1].timestamp) < min_secs {
                debug!("ignoring ground stop {}..{}", start, end);
                modes[start..=end].fill( FlightMode::Moving);
            }
        }
    }
}

/// takeoff is the first moving fix, landing the first stationary fix after the last (Concat) or first (First)
/// moving run. If there is no such fix the window extends to the last fix (open landing). A single moving fix at
/// the end of the log has no extent and does not count as a flight
pub fn airborne_window (modes: &[FlightMode], pick: FlightPick)->Option<AirborneWindow> {
    let moving: Vec<(usize,usize)> = runs(modes).into_iter()
        .filter( |(m,_,_)| *m == FlightMode::Moving)
        .map( |(_,start,end)| (start,end))
        .collect();

    let takeoff = moving.first()?.0;
    let last_moving = match pick {
        FlightPick::First => moving.first()?.1,
        FlightPick::Concat => moving.last()?.1
    };

    if last_moving+1 < modes.len() {
        Some( AirborneWindow { takeoff, landing: last_moving+1, open_landing: false })
    } else if last_moving > takeoff {
        Some( AirborneWindow { takeoff, landing: last_moving, open_landing: true })
    } else {
        None
    }
}

/// smoothed circling/cruising sequence over all fixes. Only the airborne window is classified, fixes outside
/// of it are cruising. Stationary fixes inside the window count as not turning
pub fn classify_circling (signals: &Signals, modes: &[FlightMode], window: Option<AirborneWindow>, config: &FlightConfig)->Vec<TrackMode> {
    let mut track = vec![TrackMode::Cruising; modes.len()];

    if let Some(w) = window {
        let turn_rates = signals.turn_rate_observations();
        let obs: Vec<Option<f64>> = (w.takeoff..=w.landing).map( |i| {
            if modes[i] == FlightMode::Stationary { Some(0.0) } else { turn_rates[i] }
        }).collect();

        let smoothed: Vec<TrackMode> = smooth_states( &obs, &circling_costs(config));
        track[w.takeoff..=w.landing].copy_from_slice( &smoothed);
    }

    track
}
