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

mod common;
use common::*;

use std::time::Duration;
use odin_igc::*;
use odin_igc::validate::{check_altitude, select_altitude_source, AltitudeCheck};

// run with "cargo test --test test_validate -- --nocapture"

fn verdict_of (fixes: Vec<Fix>, config: &FlightConfig)->Verdict {
    let flight = Flight::analyze( fixes, FlightMetadata::default(), config);
    println!("{}", flight);
    for n in flight.notes() { println!("  note: {}", n) }
    flight.verdict()
}

fn reason_of (fixes: Vec<Fix>)->Option<Anomaly> {
    verdict_of( fixes, &FlightConfig::default()).reason
}

fn flight_with_duplicates (n: usize)->Vec<Fix> {
    let mut tb = TrackBuilder::new( 47.0, 11.0, 1000.0).stationary( 10, 4.0);
    for _ in 0..n {
        tb = tb.straight( 7, 4.0, 60.0, -1.0).duplicate();
    }
    tb.stationary( 10, 4.0).build()
}

fn flight_with_jumps (n: usize)->Vec<Fix> {
    let mut tb = TrackBuilder::new( 47.0, 11.0, 1000.0).stationary( 10, 4.0);
    for _ in 0..n {
        tb = tb.straight( 15, 4.0, 60.0, -1.0).jump( 4.0, 5000.0); // 4500 km/h
    }
    tb.straight( 15, 4.0, 60.0, -1.0).stationary( 10, 4.0).build()
}

fn flight_with_pauses (n: usize)->Vec<Fix> {
    let mut tb = TrackBuilder::new( 47.0, 11.0, 1000.0).stationary( 10, 4.0);
    for _ in 0..n {
        tb = tb.straight( 7, 4.0, 60.0, -1.0).gap( 60.0);
    }
    tb.stationary( 10, 4.0).build()
}

fn straight_flight ()->Vec<Fix> {
    TrackBuilder::new( 47.0, 11.0, 1000.0)
        .stationary( 10, 4.0)
        .straight( 80, 4.0, 60.0, -1.0)
        .stationary( 10, 4.0)
        .build()
}

#[test]
fn test_anomaly_strings() {
    let expected = [
        (Anomaly::InsufficientData, "insufficient data"),
        (Anomaly::TimeAnomaly, "time anomaly"),
        (Anomaly::SpeedAltitudeAnomaly, "speed/altitude anomaly"),
        (Anomaly::RecordingGap, "recording gap"),
        (Anomaly::NoFlightDetected, "no flight detected"),
    ];
    for (anomaly, s) in expected {
        assert_eq!( anomaly.to_string(), s);
        assert_eq!( serde_json::to_string( &anomaly).unwrap(), format!("\"{s}\""));
        assert_eq!( serde_json::from_str::<Anomaly>( &format!("\"{s}\"")).unwrap(), anomaly);
    }
}

#[test]
fn test_valid() {
    let verdict = verdict_of( straight_flight(), &FlightConfig::default());
    assert_eq!( verdict, Verdict::passed());
    assert!( verdict.valid && verdict.reason.is_none());
}

#[test]
fn test_insufficient_data() {
    let fixes = TrackBuilder::new( 47.0, 11.0, 1000.0).stationary( 5, 4.0).straight( 30, 4.0, 60.0, -1.0).build();
    assert_eq!( reason_of( fixes), Some(Anomaly::InsufficientData));
}

#[test]
fn test_time_going_backwards() {
    let fixes = TrackBuilder::new( 47.0, 11.0, 1000.0)
        .stationary( 10, 4.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .rewind( 10.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .stationary( 10, 4.0)
        .build();
    assert_eq!( reason_of( fixes), Some(Anomaly::TimeAnomaly));
}

#[test]
fn test_too_many_duplicates() {
    assert_eq!( reason_of( flight_with_duplicates(10)), None);
    assert_eq!( reason_of( flight_with_duplicates(11)), Some(Anomaly::TimeAnomaly));
}

#[test]
fn test_speed_anomaly() {
    assert_eq!( reason_of( flight_with_jumps(3)), None);
    assert_eq!( reason_of( flight_with_jumps(4)), Some(Anomaly::SpeedAltitudeAnomaly));
}

#[test]
fn test_altitude_anomaly() {
    // one bad sensor is replaced by the other one
    let mut fixes = straight_flight();
    fixes[50].press_alt = 20000.0;
    let flight = Flight::analyze( fixes.clone(), FlightMetadata::default(), &FlightConfig::default());
    assert!( flight.is_valid());
    assert_eq!( flight.alt_source(), AltitudeSource::Gnss);
    assert!( flight.notes().iter().any( |n| n.contains("pressure altitude implausible")));

    // both bad sensors make the recording unusable
    fixes[50].gnss_alt = 20000.0;
    assert_eq!( reason_of( fixes), Some(Anomaly::SpeedAltitudeAnomaly));
}

#[test]
fn test_soft_gaps() {
    assert_eq!( reason_of( flight_with_pauses(10)), None);
    assert_eq!( reason_of( flight_with_pauses(11)), Some(Anomaly::RecordingGap));
}

#[test]
fn test_max_gap_config() {
    let fixes = TrackBuilder::new( 47.0, 11.0, 1000.0)
        .stationary( 10, 4.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .gap( 1200.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .stationary( 10, 4.0)
        .build();

    assert_eq!( verdict_of( fixes.clone(), &FlightConfig::default()).reason, None);

    let config = FlightConfig { max_gap: Duration::from_secs(900), ..FlightConfig::default() };
    assert_eq!( verdict_of( fixes, &config).reason, Some(Anomaly::RecordingGap));
}

#[test]
fn test_check_order() {
    // time anomalies are reported before recording gaps
    let fixes = TrackBuilder::new( 47.0, 11.0, 1000.0)
        .stationary( 10, 4.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .rewind( 10.0)
        .gap( 7200.0)
        .straight( 40, 4.0, 60.0, -1.0)
        .stationary( 10, 4.0)
        .build();
    assert_eq!( reason_of( fixes), Some(Anomaly::TimeAnomaly));

    // insufficient data before everything else
    let fixes = TrackBuilder::new( 47.0, 11.0, 1000.0).stationary( 10, 4.0).rewind( 10.0).gap( 7200.0).build();
    assert_eq!( reason_of( fixes), Some(Anomaly::InsufficientData));
}

#[test]
fn test_altitude_source_selection() {
    let config = FlightConfig::default();

    // flat-lined sensors are still plausible, pressure wins if both are flat
    let fixes = TrackBuilder::new( 47.0, 11.0, 1000.0).stationary( 99, 4.0).build();
    let press = check_altitude( &fixes, AltitudeSource::Pressure, &config);
    let gnss = check_altitude( &fixes, AltitudeSource::Gnss, &config);
    println!("{:?}\n{:?}", press, gnss);
    assert!( press.plausible && press.flatlined);
    assert!( gnss.plausible && gnss.flatlined);

    let mut notes = Vec::new();
    assert_eq!( select_altitude_source( &press, &gnss, &mut notes), AltitudeSource::Pressure);
    assert!( notes.iter().any( |n| n.contains("flat-lined")));

    // a flat-lined pressure sensor is replaced by a working gnss sensor
    let mut fixes = straight_flight();
    for f in fixes.iter_mut() { f.press_alt = 0.0 }
    let press = check_altitude( &fixes, AltitudeSource::Pressure, &config);
    let gnss = check_altitude( &fixes, AltitudeSource::Gnss, &config);
    assert!( press.flatlined && !gnss.flatlined);

    let mut notes = Vec::new();
    assert_eq!( select_altitude_source( &press, &gnss, &mut notes), AltitudeSource::Gnss);

    // implausible everywhere falls back to gnss
    let bad = AltitudeCheck { plausible: false, ..press };
    let bad_gnss = AltitudeCheck { plausible: false, ..gnss };
    assert_eq!( select_altitude_source( &bad, &bad_gnss, &mut notes), AltitudeSource::Gnss);
}
