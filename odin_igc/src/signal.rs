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

/// per fix-pair signals derived from a fix sequence: ground speed, bearing and bearing rate.
/// Sample `k` (k >= 1) describes the pair of fixes (k-1,k), i.e. for N fixes there are N-1 samples.
/// Samples with a non-positive time step are kept (the validator inspects them) but flagged
/// invalid and excluded from the observation sequences

use serde::{Serialize,Deserialize};
use odin_common::{angle::turn_angle, datetime::elapsed_secs};
use crate::fix::Fix;

/// time steps at or below this (in seconds) count as duplicate timestamps
pub const MIN_DT: f64 = 1e-5;

const MPS_TO_KMH: f64 = 3.6;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Sample {
    pub dt: f64,        // seconds, negative if time goes backwards
    pub distance: f64,  // meters
    pub speed: f64,     // km/h, 0 for invalid samples
    pub bearing: f64,   // degrees (-180,180]
    pub bearing_rate: Option<f64>, // deg/s, positive for clockwise turns
    pub valid: bool,
}

/// compute the raw sample for a fix pair. This is a pure function of its two fixes, the bearing rate
/// needs a look-back and is therefore filled in by [`derive_signals`]
pub fn sample (f0: &Fix, f1: &Fix)->Sample {
    let p0 = f0.position();
    let p1 = f1.position();
    let dt = elapsed_secs( &f0.timestamp, &f1.timestamp);
    let distance = p0.distance_meters_to(&p1);
    let bearing = p0.bearing_to(&p1);
    let valid = dt > MIN_DT;
    let speed = if valid { MPS_TO_KMH * distance / dt } else { 0.0 };

    Sample { dt, distance, speed, bearing, bearing_rate: None, valid }
}

#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct Signals {
    n_fixes: usize,
    samples: Vec<Sample>, // samples[k-1] is the sample of fix k
}

/// derive samples for all consecutive fix pairs. The bearing rate of sample `k` refers to the closest earlier valid
/// sample `j` that is at least `min_bearing_interval` seconds older. A zero interval means `j` is the previous valid sample
pub fn derive_signals (fixes: &[Fix], min_bearing_interval: f64)->Signals {
    let mut samples: Vec<Sample> = fixes.windows(2).map( |w| sample( &w[0], &w[1])).collect();

    for k in 1..fixes.len() {
        if samples[k-1].valid {
            let tk = &fixes[k].timestamp;
            let mut j = k-1;
            while j >= 1 {
                let sj = &samples[j-1];
                if sj.valid {
                    let dt = elapsed_secs( &fixes[j].timestamp, tk);
                    if dt > MIN_DT && dt >= min_bearing_interval {
                        let turn = turn_angle( sj.bearing, samples[k-1].bearing);
                        samples[k-1].bearing_rate = Some( turn / dt);
                        break;
                    }
                }
                j -= 1;
            }
        }
    }

    Signals { n_fixes: fixes.len(), samples }
}

impl Signals {
    pub fn n_fixes (&self)->usize { self.n_fixes }
    pub fn samples (&self)->&[Sample] { self.samples.as_slice() }

    /// the sample that ends in fix `idx` (None for the first fix)
    pub fn sample_of_fix (&self, idx: usize)->Option<&Sample> {
        if idx > 0 { self.samples.get( idx-1) } else { None }
    }

    pub fn valid_samples (&self)->usize { self.samples.iter().filter( |s| s.valid).count() }
    pub fn invalid_samples (&self)->usize { self.samples.len() - self.valid_samples() }

    /// number of fixes that contribute to at least one valid sample, plus the first fix
    pub fn usable_fixes (&self)->usize {
        if self.n_fixes == 0 { 0 } else { 1 + self.valid_samples() }
    }

    /// one ground speed observation per fix, None for the first fix and for invalid samples
    pub fn speed_observations (&self)->Vec<Option<f64>> {
        self.observations( |s| if s.valid { Some(s.speed) } else { None })
    }

    /// one absolute bearing rate observation per fix, None where the rate is undefined
    pub fn turn_rate_observations (&self)->Vec<Option<f64>> {
        self.observations( |s| s.bearing_rate.map( |r| r.abs()))
    }

    fn observations<F> (&self, f: F)->Vec<Option<f64>> where F: Fn(&Sample)->Option<f64> {
        let mut obs = Vec::with_capacity( self.n_fixes);
        if self.n_fixes > 0 {
            obs.push( None);
            obs.extend( self.samples.iter().map(f));
        }
        obs
    }
}
