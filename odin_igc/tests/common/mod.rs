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

/// synthetic track builders for flight analysis tests

use chrono::{DateTime,TimeDelta,TimeZone,Utc};
use odin_common::geo::GeoPoint;
use odin_igc::Fix;

pub const GNSS_OFFSET: f64 = 15.0; // gnss altitude is above pressure altitude by this

pub fn start_time ()->DateTime<Utc> {
    Utc.with_ymd_and_hms( 2024, 7, 14, 10, 0, 0).unwrap()
}

pub fn init_tracing () {
    let _ = tracing_subscriber::fmt().with_max_level( tracing::Level::DEBUG).with_test_writer().try_init();
}

/// builds a fix sequence by moving a position with given speeds, headings and climb rates.
/// Each step advances the clock and appends one fix
pub struct TrackBuilder {
    fixes: Vec<Fix>,
    pos: GeoPoint,
    t: DateTime<Utc>,
    alt: f64, // pressure altitude
    heading: f64,
}

impl TrackBuilder {
    pub fn new (lat: f64, lon: f64, alt: f64)->Self {
        let mut tb = TrackBuilder { fixes: Vec::new(), pos: GeoPoint::from_lat_lon_degrees(lat,lon), t: start_time(), alt, heading: 0.0 };
        tb.push();
        tb
    }

    fn push (&mut self) {
        self.fixes.push( Fix::new( self.t, self.pos.latitude_degrees(), self.pos.longitude_degrees(), self.alt + GNSS_OFFSET, self.alt));
    }

    fn advance (&mut self, dt: f64) {
        self.t = self.t + TimeDelta::milliseconds( (dt * 1000.0).round() as i64);
    }

    pub fn heading (mut self, heading: f64)->Self {
        self.heading = heading;
        self
    }

    pub fn stationary (mut self, n: usize, dt: f64)->Self {
        for _ in 0..n {
            self.advance(dt);
            self.push();
        }
        self
    }

    /// `speed` in km/h, `vario` in m/s
    pub fn straight (mut self, n: usize, dt: f64, speed: f64, vario: f64)->Self {
        for _ in 0..n {
            self.advance(dt);
            self.pos = self.pos.destination( self.heading, speed / 3.6 * dt);
            self.alt += vario * dt;
            self.push();
        }
        self
    }

    /// turn `turn` degrees before each step
    pub fn circle (mut self, n: usize, dt: f64, speed: f64, turn: f64, vario: f64)->Self {
        for _ in 0..n {
            self.heading = odin_common::angle::normalize_180( self.heading + turn);
            self.advance(dt);
            self.pos = self.pos.destination( self.heading, speed / 3.6 * dt);
            self.alt += vario * dt;
            self.push();
        }
        self
    }

    /// no fixes for `secs`, then one fix at the same position
    pub fn gap (mut self, secs: f64)->Self {
        self.advance(secs);
        self.push();
        self
    }

    /// jump `dist` meters ahead within `dt`
    pub fn jump (mut self, dt: f64, dist: f64)->Self {
        self.advance(dt);
        self.pos = self.pos.destination( self.heading, dist);
        self.push();
        self
    }

    /// set the clock back by `secs` and add a fix
    pub fn rewind (mut self, secs: f64)->Self {
        self.advance(-secs);
        self.push();
        self
    }

    /// repeat the last fix (same timestamp)
    pub fn duplicate (mut self)->Self {
        if let Some(last) = self.fixes.last().copied() {
            self.fixes.push(last);
        }
        self
    }

    pub fn len (&self)->usize { self.fixes.len() }

    pub fn build (self)->Vec<Fix> { self.fixes }
}

/// 30 fixes on the ground, 100 fixes in a straight line at 60km/h, 30 fixes on the ground (4s intervals)
pub fn glide_track ()->Vec<Fix> {
    TrackBuilder::new( 47.0, 11.0, 1000.0)
        .stationary( 30, 4.0)
        .straight( 100, 4.0, 60.0, -1.0)
        .stationary( 30, 4.0)
        .build()
}

/// straight flight with a 20 fix thermal (30° per 4s, climbing 2m/s) in the middle
pub fn thermal_track ()->Vec<Fix> {
    TrackBuilder::new( 47.0, 11.0, 1000.0)
        .stationary( 20, 4.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .circle( 20, 4.0, 60.0, 30.0, 2.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .stationary( 20, 4.0)
        .build()
}
