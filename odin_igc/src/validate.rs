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

/// recording plausibility checks. The validator never fails, it assigns the first anomaly of an ordered
/// checklist (or none) and collects warnings that do not affect the verdict as notes

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::{fix::{Fix,AltitudeSource}, signal::{Signals,MIN_DT}, classify::AirborneWindow, config::FlightConfig};

/// the reasons for rejecting a recording, in order of check priority
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Anomaly {
    #[serde(rename="insufficient data")]
    InsufficientData,
    #[serde(rename="time anomaly")]
    TimeAnomaly,
    #[serde(rename="speed/altitude anomaly")]
    SpeedAltitudeAnomaly,
    #[serde(rename="recording gap")]
    RecordingGap,
    #[serde(rename="no flight detected")]
    NoFlightDetected,
}

impl Anomaly {
    pub fn as_str (&self)->&'static str {
        match self {
            Anomaly::InsufficientData => "insufficient data",
            Anomaly::TimeAnomaly => "time anomaly",
            Anomaly::SpeedAltitudeAnomaly => "speed/altitude anomaly",
            Anomaly::RecordingGap => "recording gap",
            Anomaly::NoFlightDetected => "no flight detected",
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub reason: Option<Anomaly>,
}

impl Verdict {
    pub fn passed ()->Self { Verdict { valid: true, reason: None } }
    pub fn failed (reason: Anomaly)->Self { Verdict { valid: false, reason: Some(reason) } }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(reason) => write!(f, "invalid ({})", reason),
            None => write!(f, "valid")
        }
    }
}

/* #region altitude sensors *********************************************************************/

/// plausibility statistics of one altitude sensor
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct AltitudeCheck {
    pub source: AltitudeSource,
    pub huge_changes: usize,     // changes faster than max_alt_change_rate
    pub limit_violations: usize, // values outside of [min_alt,max_alt]
    pub avg_abs_change: f64,     // per interval, excluding huge changes
    pub plausible: bool,
    pub flatlined: bool,
}

pub fn check_altitude (fixes: &[Fix], source: AltitudeSource, config: &FlightConfig)->AltitudeCheck {
    let mut huge_changes = 0;
    let mut sum_changes = 0.0;

    for w in fixes.windows(2) {
        let dh = (w[1].altitude(source) - w[0].altitude(source)).abs();
        let dt = (w[1].timestamp - w[0].timestamp).num_milliseconds().abs() as f64 / 1000.0;

        if dt > 0.5 {
            if dh / dt > config.max_alt_change_rate { huge_changes += 1 } else { sum_changes += dh }
        }
    }

    let limit_violations = fixes.iter().filter( |f| {
        let h = f.altitude(source);
        h < config.min_alt || h > config.max_alt
    }).count();

    let avg_abs_change = if fixes.len() > 1 { sum_changes / (fixes.len() - 1) as f64 } else { 0.0 };
    let plausible = huge_changes <= config.max_alt_change_violations && limit_violations == 0;
    let flatlined = avg_abs_change < config.min_avg_abs_alt_change;

    AltitudeCheck { source, huge_changes, limit_violations, avg_abs_change, plausible, flatlined }
}

/// pick the pressure sensor if it is plausible and not flat-lined, else the GNSS sensor under the same conditions,
/// else the first plausible one, else GNSS. Reasons for not using the pressure sensor are added to `notes`
pub fn select_altitude_source (press: &AltitudeCheck, gnss: &AltitudeCheck, notes: &mut Vec<String>)->AltitudeSource {
    for chk in [press, gnss] {
        if !chk.plausible {
            notes.push( format!("{} altitude implausible: {} high rate changes, {} values out of limits", chk.source, chk.huge_changes, chk.limit_violations));
        } else if chk.flatlined {
            notes.push( format!("{} altitude flat-lined: average change {:.4}m", chk.source, chk.avg_abs_change));
        }
    }

    let source = if press.plausible && !press.flatlined {
        AltitudeSource::Pressure
    } else if gnss.plausible && !gnss.flatlined {
        AltitudeSource::Gnss
    } else if press.plausible {
        AltitudeSource::Pressure
    } else {
        AltitudeSource::Gnss
    };

    if source != AltitudeSource::Pressure || press.flatlined {
        notes.push( format!("using {} altitude", source));
    }
    source
}

/* #endregion altitude sensors */

/// apply the ordered checklist, first match wins
pub fn validate (fixes: &[Fix], signals: &Signals, window: Option<AirborneWindow>, press: &AltitudeCheck, gnss: &AltitudeCheck, config: &FlightConfig, notes: &mut Vec<String>)->Verdict {
    let samples = signals.samples();

    //--- insufficient data
    let usable = signals.usable_fixes();
    if usable < config.min_fixes {
        notes.push( format!("{} usable fixes, less than the minimum {}", usable, config.min_fixes));
        return Verdict::failed( Anomaly::InsufficientData)
    }

    //--- time anomaly
    let new_days = utc_day_changes( fixes);
    if new_days > config.max_new_days {
        notes.push( format!("{} UTC midnight crossings, allowed {}", new_days, config.max_new_days));
        return Verdict::failed( Anomaly::TimeAnomaly)
    }
    let backward = samples.iter().filter( |s| s.dt < -MIN_DT).count();
    if backward > 0 {
        notes.push( format!("time goes backwards in {} intervals", backward));
        return Verdict::failed( Anomaly::TimeAnomaly)
    }
    let too_short = samples.iter().filter( |s| s.dt < config.min_seconds_between_fixes - MIN_DT).count();
    if too_short > config.max_time_violations {
        notes.push( format!("{} intervals shorter than {}s, allowed {}", too_short, config.min_seconds_between_fixes, config.max_time_violations));
        return Verdict::failed( Anomaly::TimeAnomaly)
    }

    //--- speed/altitude anomaly
    let too_fast = samples.iter().filter( |s| s.valid && s.speed > config.max_ground_speed).count();
    if too_fast > config.max_speed_violations {
        notes.push( format!("{} ground speeds above {}km/h, allowed {}", too_fast, config.max_ground_speed, config.max_speed_violations));
        return Verdict::failed( Anomaly::SpeedAltitudeAnomaly)
    }
    if !press.plausible && !gnss.plausible {
        notes.push( "neither pressure nor gnss altitude is plausible".to_string());
        return Verdict::failed( Anomaly::SpeedAltitudeAnomaly)
    }

    //--- recording gap
    let max_gap = config.max_gap.as_secs_f64();
    if let Some(s) = samples.iter().find( |s| s.dt > max_gap) {
        notes.push( format!("recording gap of {:.0}s", s.dt));
        return Verdict::failed( Anomaly::RecordingGap)
    }
    let too_long = samples.iter().filter( |s| s.dt > config.max_seconds_between_fixes + MIN_DT).count();
    if too_long > config.max_time_violations {
        notes.push( format!("{} intervals longer than {}s, allowed {}", too_long, config.max_seconds_between_fixes, config.max_time_violations));
        return Verdict::failed( Anomaly::RecordingGap)
    }

    //--- no flight
    if window.is_none() {
        notes.push( "no takeoff detected".to_string());
        return Verdict::failed( Anomaly::NoFlightDetected)
    }

    Verdict::passed()
}

/// number of consecutive fixes with different UTC dates
pub fn utc_day_changes (fixes: &[Fix])->usize {
    fixes.windows(2).filter( |w| w[0].timestamp.date_naive() != w[1].timestamp.date_naive()).count()
}
