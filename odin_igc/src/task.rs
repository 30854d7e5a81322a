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

use std::{collections::HashMap, path::Path};
use chrono::{DateTime,NaiveDate,NaiveTime,Timelike,Utc};
use serde::{Serialize,Deserialize};
use odin_common::{geo::GeoPoint, fs::filepath_contents_as_string, datetime::{utc_datetime_from_secs_of_day, SECS_PER_DAY}};

use crate::{Flight, fix::Fix, errors::{OdinIgcError,Result,parse_error}};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum TurnpointKind {
    StartExit,   // start by leaving the cylinder
    StartEnter,  // start by entering the cylinder
    Cylinder,
    EndOfSpeedSection,
    GoalCylinder,
    GoalLine,    // approximated by its cylinder
}

impl TurnpointKind {
    pub fn is_start (&self)->bool {
        matches!( self, TurnpointKind::StartExit | TurnpointKind::StartEnter)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Turnpoint {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64, // meters
    pub kind: TurnpointKind,
}

impl Turnpoint {
    pub fn new (lat: f64, lon: f64, radius: f64, kind: TurnpointKind)->Self {
        Turnpoint { lat, lon, radius, kind }
    }

    pub fn contains (&self, fix: &Fix)->bool {
        GeoPoint::from_lat_lon_degrees( self.lat, self.lon).distance_meters_to( &fix.position()) < self.radius
    }
}

/// a competition task. Turnpoints have to be reached in order between `start_time` and `end_time`
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Task {
    pub turnpoints: Vec<Turnpoint>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Task {
    pub fn from_ron_str (s: &str)->Result<Self> {
        Ok( ron::from_str(s)? )
    }

    pub fn from_ron_file<P: AsRef<Path>> (path: P)->Result<Self> {
        let s = filepath_contents_as_string( &path)?;
        Self::from_ron_str( &s)
    }

    /// read an LK8000 task file. These do not have an end of speed section or a task end time, which is therefore
    /// set to 23:59:59 of the flight `date`
    pub fn from_lkt_file<P: AsRef<Path>> (path: P, date: NaiveDate)->Result<Self> {
        let s = filepath_contents_as_string( &path)?;
        Self::from_lkt_str( &s, date)
    }

    /// the first task point is the start, the last one the goal (goal lines are treated as cylinders), everything
    /// in between is a cylinder. Task points only refer to waypoints by name
    pub fn from_lkt_str (s: &str, date: NaiveDate)->Result<Self> {
        let lk_task: LkTask = quick_xml::de::from_str(s)?;

        let gate = lk_task.options.iter().flat_map( |o| o.time_gates.iter()).next()
            .ok_or_else( || parse_error!("no time-gate in task"))?;
        let open_time = NaiveTime::parse_from_str( gate.open_time.trim(), "%H:%M")?;
        let start_time = utc_datetime_from_secs_of_day( date, open_time.num_seconds_from_midnight() as i64);
        let end_time = utc_datetime_from_secs_of_day( date, SECS_PER_DAY - 1);

        let coords: HashMap<&str,(f64,f64)> = lk_task.waypoints.points.iter()
            .filter_map( |p| Some( (p.name.as_str(), (p.latitude?, p.longitude?))))
            .collect();

        let task_points = &lk_task.taskpoints.points;
        if task_points.is_empty() { return Err( parse_error!("no taskpoints in task")) }

        let mut turnpoints = Vec::with_capacity( task_points.len());
        for (i,tp) in task_points.iter().enumerate() {
            let (lat,lon) = *coords.get( tp.name.as_str()).ok_or_else( || parse_error!("unknown waypoint '{}'", tp.name))?;
            let radius = tp.radius.ok_or_else( || parse_error!("no radius for taskpoint '{}'", tp.name))?;

            let kind = if i == 0 {
                if tp.exit.as_deref().is_some_and( |e| e.eq_ignore_ascii_case("true")) { TurnpointKind::StartExit } else { TurnpointKind::StartEnter }
            } else if i == task_points.len()-1 {
                TurnpointKind::GoalCylinder
            } else {
                TurnpointKind::Cylinder
            };

            turnpoints.push( Turnpoint::new( lat, lon, radius, kind));
        }

        Ok( Task { turnpoints, start_time, end_time })
    }

    /// the indices of the fixes at which the turnpoints were achieved, in turnpoint order. Fixes after the
    /// task end time are not considered. A start counts only after the pilot was on the required side
    /// of the start cylinder (inside for exit starts, outside for enter starts) after the start time
    pub fn check_flight (&self, flight: &Flight)->Vec<usize> {
        let mut reached = Vec::new();
        let mut ready_to_start = false;

        for (i,fix) in flight.fixes().iter().enumerate() {
            let Some(tp) = self.turnpoints.get( reached.len()) else { break }; // all reached
            if fix.timestamp > self.end_time { break }

            let inside = tp.contains(fix);
            match tp.kind {
                TurnpointKind::StartExit | TurnpointKind::StartEnter => {
                    let must_be_inside = tp.kind == TurnpointKind::StartExit;
                    if ready_to_start {
                        if inside != must_be_inside { reached.push(i) }
                    } else if fix.timestamp > self.start_time && inside == must_be_inside {
                        ready_to_start = true;
                    }
                }
                _ => {
                    if inside { reached.push(i) }
                }
            }
        }

        reached
    }
}

/* #region LK8000 task file format **************************************************************/

#[derive(Deserialize)]
struct LkTask {
    #[serde(default)]
    options: Option<LkOptions>,
    taskpoints: LkPoints,
    waypoints: LkPoints,
}

#[derive(Deserialize)]
struct LkOptions {
    #[serde(rename="time-gate", default)]
    time_gates: Vec<LkTimeGate>,
}

#[derive(Deserialize)]
struct LkTimeGate {
    #[serde(rename="@open-time")]
    open_time: String, // HH:MM
}

#[derive(Deserialize)]
struct LkPoints {
    #[serde(rename="point", default)]
    points: Vec<LkPoint>,
}

// taskpoints have name, radius (meters) and Exit, waypoints have name, latitude and longitude
#[derive(Deserialize)]
struct LkPoint {
    #[serde(rename="@name")]
    name: String,
    #[serde(rename="@radius", default)]
    radius: Option<f64>,
    #[serde(rename="@Exit", default)]
    exit: Option<String>,
    #[serde(rename="@latitude", default)]
    latitude: Option<f64>,
    #[serde(rename="@longitude", default)]
    longitude: Option<f64>,
}

/* #endregion LK8000 task file format */
