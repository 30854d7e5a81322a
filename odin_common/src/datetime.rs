/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
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

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Serialize,Deserialize,Serializer,Deserializer};
use std::time::Duration;

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

pub const SECS_PER_DAY: i64 = 86400;

/// signed number of (fractional) seconds from `earlier` to `later`. Negative if `later` is before `earlier`
#[inline]
pub fn elapsed_secs (earlier: &DateTime<Utc>, later: &DateTime<Utc>) -> f64 {
    (*later - *earlier).num_milliseconds() as f64 / 1000.0
}

/// get a DateTime<Utc> from a NaiveDate that is supposed to be in Utc
pub fn naive_utc_date_to_utc_datetime (nd: NaiveDate) -> DateTime<Utc> {
    let ndt = NaiveDateTime::new(nd, NaiveTime::MIN);
    DateTime::from_naive_utc_and_offset(ndt,Utc)
}

/// the DateTime<Utc> that is `secs_of_day` seconds after midnight of the given (Utc) date.
/// `secs_of_day` can exceed a day, which is how we represent recordings that cross 0:00 UTC
pub fn utc_datetime_from_secs_of_day (nd: NaiveDate, secs_of_day: i64) -> DateTime<Utc> {
    naive_utc_date_to_utc_datetime(nd) + TimeDelta::seconds(secs_of_day)
}

//--- support for serde

pub fn ser_duration_as_fractional_secs<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let secs = dur.as_secs_f64();
    s.serialize_f64( secs)
}

pub fn de_duration_from_fractional_secs <'a,D>(deserializer: D) -> Result<Duration,D::Error> where D: Deserializer<'a> {
    let secs: f64 = f64::deserialize(deserializer)?;
    if secs.is_finite() && secs >= 0.0 {
        Ok( Duration::from_secs_f64(secs) )
    } else {
        Err( serde::de::Error::custom( format!("not a valid duration: {secs} sec")))
    }
}
