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

use std::{fmt, time::Duration};
use serde::{Serialize,Deserialize};
use uom::si::{f64::{Length,Time,Velocity}, length::meter, time::second, velocity::{meter_per_second,kilometer_per_hour}};
use odin_common::{datetime::elapsed_secs, geo::track_length};

use crate::{fix::{Fix,AltitudeSource}, classify::{TrackMode,AirborneWindow}};
use crate::viterbi::{runs, TwoState};

/// a maximal run of circling fixes. `enter` and `exit` are the first and last fix of the run
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Thermal {
    pub enter: usize,
    pub exit: usize,
    pub alt_gain: Length,
    pub duration: Time,
}

impl Thermal {
    pub fn new (fixes: &[Fix], enter: usize, exit: usize, alt_source: AltitudeSource)->Self {
        let alt_gain = Length::new::<meter>( fixes[exit].altitude(alt_source) - fixes[enter].altitude(alt_source));
        let duration = Time::new::<second>( elapsed_secs( &fixes[enter].timestamp, &fixes[exit].timestamp));
        Thermal { enter, exit, alt_gain, duration }
    }

    /// average climb rate, zero for zero duration
    pub fn vertical_velocity (&self)->Velocity {
        let secs = self.duration.get::<second>();
        if secs > 0.0 {
            Velocity::new::<meter_per_second>( self.alt_gain.get::<meter>() / secs)
        } else {
            Velocity::new::<meter_per_second>(0.0)
        }
    }
}

impl fmt::Display for Thermal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thermal([{}..{}], {:.0}s, {:+.0}m, {:+.1}m/s)", self.enter, self.exit,
            self.duration.get::<second>(), self.alt_gain.get::<meter>(), self.vertical_velocity().get::<meter_per_second>())
    }
}

/// a maximal run of cruising (airborne, non-circling) fixes
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Glide {
    pub start: usize,
    pub end: usize,
    pub distance: Length, // cumulative over all fixes of the run
    pub speed: Velocity,  // average
    pub alt_change: Length,
    pub duration: Time,
}

impl Glide {
    pub fn new (fixes: &[Fix], start: usize, end: usize, alt_source: AltitudeSource)->Self {
        let distance = track_length( fixes[start..=end].iter().map( |f| f.position()));
        let secs = elapsed_secs( &fixes[start].timestamp, &fixes[end].timestamp);
        let speed = if secs > 0.0 { distance.get::<meter>() / secs } else { 0.0 };
        let alt_change = fixes[end].altitude(alt_source) - fixes[start].altitude(alt_source);

        Glide {
            start, end,
            distance,
            speed: Velocity::new::<meter_per_second>(speed),
            alt_change: Length::new::<meter>(alt_change),
            duration: Time::new::<second>(secs),
        }
    }

    /// distance flown per altitude lost (L/D). None if there was no altitude change
    pub fn glide_ratio (&self)->Option<f64> {
        let dh = self.alt_change.get::<meter>();
        if dh.abs() > 1e-7 { Some( self.distance.get::<meter>() / -dh) } else { None }
    }
}

impl fmt::Display for Glide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glide([{}..{}], {:.0}s, {:.0}m, {:.1}km/h, {:+.0}m)", self.start, self.end,
            self.duration.get::<second>(), self.distance.get::<meter>(), self.speed.get::<kilometer_per_hour>(), self.alt_change.get::<meter>())
    }
}

/// the result of segmenting the airborne window
#[derive(Debug,Clone,Default,PartialEq)]
pub struct Segments {
    pub track_modes: Vec<TrackMode>, // after merging short runs
    pub thermals: Vec<Thermal>,
    pub glides: Vec<Glide>,
}

/// merge short runs within the window and turn the remaining runs into thermals and glides. Consecutive
/// segments are adjacent (next start == previous end + 1), i.e. together they partition the window.
/// Feeding the returned `track_modes` back into this function yields the same segments.
/// Airborne windows always span at least two fixes, hence each window is covered by at least one segment
pub fn segment (fixes: &[Fix], track_modes: &[TrackMode], window: Option<AirborneWindow>, alt_source: AltitudeSource,
                min_segment_fixes: usize, min_thermal_duration: Duration)->Segments {
    let mut track_modes = track_modes.to_vec();
    let mut thermals = Vec::new();
    let mut glides = Vec::new();

    if let Some(w) = window {
        let wfixes = &fixes[w.takeoff..=w.landing];
        let wmodes = &mut track_modes[w.takeoff..=w.landing];

        // a run of one fix has no extent, hence the floor is at least two
        apply_noise_floor( wmodes, min_segment_fixes.max(2));
        apply_min_thermal_duration( wfixes, wmodes, min_thermal_duration);

        for (mode, start, end) in runs(wmodes) {
            if end > start {
                let (start, end) = (start + w.takeoff, end + w.takeoff);
                match mode {
                    TrackMode::Circling => thermals.push( Thermal::new( fixes, start, end, alt_source)),
                    TrackMode::Cruising => glides.push( Glide::new( fixes, start, end, alt_source))
                }
            }
        }
    }

    Segments { track_modes, thermals, glides }
}

/// flip the shortest run below `min_len` (leftmost on ties) to the opposite label, which merges it with its
/// neighbours. Repeat until all runs reach `min_len` or there is only one run left
pub fn apply_noise_floor<S> (modes: &mut [S], min_len: usize) where S: TwoState {
    loop {
        let rs = runs(modes);
        if rs.len() <= 1 { break }

        let shortest = rs.iter()
            .filter( |(_,start,end)| end - start + 1 < min_len)
            .min_by_key( |(_,start,end)| end - start); // min_by_key returns the first minimum

        match shortest {
            Some((mode,start,end)) => modes[*start..=*end].fill( mode.opposite()),
            None => break
        }
    }
}

/// relabel circling runs that last less than `min_duration` (first to last fix) as cruising
pub fn apply_min_thermal_duration (fixes: &[Fix], modes: &mut [TrackMode], min_duration: Duration) {
    let min_secs = min_duration.as_secs_f64();

    for (mode, start, end) in runs(modes) {
        if mode == TrackMode::Circling {
            if elapsed_secs( &fixes[start].timestamp, &fixes[end].timestamp) < min_secs - 1e-5 {
                modes[start..=end].fill( TrackMode::Cruising);
            }
        }
    }
}
