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

/// a reader for IGC flight recorder logs (FAI IGC data file standard). Each line is decoded once into a
/// closed [`IgcRecord`] variant, the reader then turns the records of a file into [`FlightMetadata`] and
/// a fully timestamped [`Fix`] sequence. Analysis code never sees raw records

use std::path::Path;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};
use odin_common::{datetime::{utc_datetime_from_secs_of_day, SECS_PER_DAY}, fs::filepath_contents_as_latin1_string};

use crate::fix::{Fix,FlightMetadata};
use crate::errors::{OdinIgcError,Result,parse_error};

lazy_static! {
    static ref B_RECORD: Regex = Regex::new(
        r"^B(\d\d)(\d\d)(\d\d)(\d\d)(\d\d)(\d\d\d)([NS])(\d\d\d)(\d\d)(\d\d\d)([EW])([AV])([-\d]\d\d\d\d)([-\d]\d\d\d\d)([0-9a-zA-Z\-]*).*$"
    ).unwrap();

    static ref HFDTE: Regex = Regex::new(r"(?i)^(?:HFDTE|HFDTEDATE:[ ]*)(\d\d)(\d\d)(\d\d)").unwrap();
    static ref HFPLT: Regex = Regex::new(r"(?i)^HFPLT(?:[ ]*PILOT(?:[ ]*IN[ ]*CHARGE)?)?[ ]*:[ ]*(.*)").unwrap();
    static ref HFGTY: Regex = Regex::new(r"(?i)^HFGTY[ ]*GLIDER[ ]*TYPE[ ]*:[ ]*(.*)").unwrap();
    static ref HFCCL: Regex = Regex::new(r"(?i)^HFCCL[ ]*COMPETITION[ ]*CLASS[ ]*:[ ]*(.*)").unwrap();
    static ref HFRFW: Regex = Regex::new(r"(?i)^HFR[FH]W[ ]*FIRMWARE[ ]*VERSION[ ]*:[ ]*(.*)").unwrap();
    static ref HFRHW: Regex = Regex::new(r"(?i)^HFR[FH]W[ ]*HARDWARE[ ]*VERSION[ ]*:[ ]*(.*)").unwrap();
    static ref HFFTY: Regex = Regex::new(r"(?i)^HFFTY[ ]*FR[ ]*TYPE[ ]*:[ ]*(.*)").unwrap();
    static ref HFGPS: Regex = Regex::new(r"(?i)^HFGPS(?:[: ]|(?:GPS))*(.*)").unwrap();
    static ref HFPRS: Regex = Regex::new(r"(?i)^HFPRS[ ]*PRESS[ ]*ALT[ ]*SENSOR[ ]*:[ ]*(.*)").unwrap();
}

/* #region records ******************************************************************************/

/// B record as it appears in the file. The time is seconds past UTC midnight of the (yet unknown) day
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RawFix {
    pub secs_of_day: u32,
    pub lat: f64,
    pub lon: f64,
    pub validity: char, // 'A': 3D fix, 'V': 2D fix or no GPS data
    pub press_alt: f64,
    pub gnss_alt: f64,
    pub extras: String,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum HeaderField {
    Date(NaiveDate),
    Pilot(String),
    GliderType(String),
    CompetitionClass(String),
    FirmwareVersion(String),
    HardwareVersion(String),
    RecorderType(String),
    GpsReceiver(String),
    PressureSensor(String),
    Other(String)
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum IgcRecord {
    Manufacturer { code: String, id: String }, // A
    Fix(RawFix),                               // B
    Extensions(String),                        // I
    Header(HeaderField),                       // H
    Ignored(char)                              // everything else (C,D,E,F,G,J,K,L ..)
}

/// decode a single (non-empty) line of an IGC file
pub fn parse_record (line: &str)->Result<IgcRecord> {
    match line.chars().next() {
        Some('A') => parse_a_record(line),
        Some('B') => Ok( IgcRecord::Fix( parse_b_record(line)?)),
        Some('H') => Ok( IgcRecord::Header( parse_h_record(line)?)),
        Some('I') => Ok( IgcRecord::Extensions( strip_non_printable(line))),
        Some(c) => Ok( IgcRecord::Ignored(c)),
        None => Err( parse_error!("empty record"))
    }
}

fn parse_a_record (line: &str)->Result<IgcRecord> {
    let code = line.get(1..4).ok_or_else( || parse_error!("A record too short: '{}'", line))?;
    let id = line.get(4..7).unwrap_or("");
    Ok( IgcRecord::Manufacturer { code: strip_non_printable(code), id: strip_non_printable(id) })
}

/// B HHMMSS DDMMmmm[NS] DDDMMmmm[EW] [AV] PPPPP GGGGG extras
pub fn parse_b_record (line: &str)->Result<RawFix> {
    let caps = B_RECORD.captures(line).ok_or_else( || parse_error!("malformed B record: '{}'", line))?;

    let hh: u32 = num( &caps[1])?;
    let mm: u32 = num( &caps[2])?;
    let ss: u32 = num( &caps[3])?;
    if hh > 23 || mm > 59 || ss > 59 { return Err( parse_error!("invalid time in B record: '{}'", line)) }

    let mut lat = num::<f64>( &caps[4])? + num::<f64>( &caps[5])? / 60.0 + num::<f64>( &caps[6])? / 60_000.0;
    if &caps[7] == "S" { lat = -lat }

    let mut lon = num::<f64>( &caps[8])? + num::<f64>( &caps[9])? / 60.0 + num::<f64>( &caps[10])? / 60_000.0;
    if &caps[11] == "W" { lon = -lon }

    if lat.abs() > 90.0 || lon.abs() > 180.0 { return Err( parse_error!("invalid position in B record: '{}'", line)) }

    Ok( RawFix {
        secs_of_day: (hh * 60 + mm) * 60 + ss,
        lat, lon,
        validity: if &caps[12] == "A" { 'A' } else { 'V' },
        press_alt: num( &caps[13])?,
        gnss_alt: num( &caps[14])?,
        extras: caps[15].to_string(),
    })
}

pub fn parse_h_record (line: &str)->Result<HeaderField> {
    let tag = line.get(0..5).map( |s| s.to_ascii_uppercase()).unwrap_or_default();

    let field = match tag.as_str() {
        "HFDTE" => {
            if let Some(caps) = HFDTE.captures(line) {
                // two digit years are in the 21st century
                let date = NaiveDate::parse_from_str( &format!("{}{}20{}", &caps[1], &caps[2], &caps[3]), "%d%m%Y")?;
                HeaderField::Date(date)
            } else {
                return Err( parse_error!("malformed date header: '{}'", line))
            }
        }
        "HFPLT" => header_value( &HFPLT, line, HeaderField::Pilot),
        "HFGTY" => header_value( &HFGTY, line, HeaderField::GliderType),
        "HFCCL" => header_value( &HFCCL, line, HeaderField::CompetitionClass),
        "HFRFW" | "HFRHW" => {
            let field = header_value( &HFRFW, line, HeaderField::FirmwareVersion);
            if let HeaderField::Other(_) = field { header_value( &HFRHW, line, HeaderField::HardwareVersion) } else { field }
        }
        "HFFTY" => header_value( &HFFTY, line, HeaderField::RecorderType),
        "HFGPS" => header_value( &HFGPS, line, HeaderField::GpsReceiver),
        "HFPRS" => header_value( &HFPRS, line, HeaderField::PressureSensor),
        _ => HeaderField::Other( strip_non_printable(line))
    };

    Ok(field)
}

fn header_value<F> (re: &Regex, line: &str, f: F)->HeaderField where F: FnOnce(String)->HeaderField {
    match re.captures(line) {
        Some(caps) => f( strip_non_printable( &caps[1]).trim().to_string()),
        None => HeaderField::Other( strip_non_printable(line))
    }
}

fn num<T: std::str::FromStr> (s: &str)->Result<T> {
    s.parse::<T>().map_err( |_| parse_error!("not a number: '{}'", s))
}

/// keep only printable ASCII chars
pub fn strip_non_printable (s: &str)->String {
    s.chars().filter( |c| (' '..='~').contains(c)).collect()
}

/* #endregion records */

/// the contents of an IGC file that are relevant for flight analysis
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct IgcLog {
    pub metadata: FlightMetadata,
    pub fixes: Vec<Fix>,
}

/// read an IGC file, which are ISO-8859-1 encoded
pub fn read_igc_file<P: AsRef<Path>> (path: P)->Result<IgcLog> {
    let input = filepath_contents_as_latin1_string( &path)?;
    read_igc_str( &input)
}

/// decode all records. Malformed records are skipped with a warning. B records only carry the time of day, dates
/// are taken from the HFDTE header and advanced on each UTC midnight crossing (time going backwards by almost a day).
/// Implausible numbers of crossings are left to the validator
pub fn read_igc_str (input: &str)->Result<IgcLog> {
    let mut metadata = FlightMetadata::default();
    let mut raw_fixes: Vec<RawFix> = Vec::new();
    let mut i_records: Vec<String> = Vec::new();

    for (i,line) in input.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() { continue }

        match parse_record(line) {
            Ok(IgcRecord::Fix(raw_fix)) => raw_fixes.push( raw_fix),
            Ok(IgcRecord::Header(field)) => set_header_field( &mut metadata, field),
            Ok(IgcRecord::Extensions(ext)) => i_records.push( ext),
            Ok(IgcRecord::Manufacturer{code,id}) => {
                if metadata.fr_manuf_code.is_none() {
                    metadata.fr_manuf_code = Some(code);
                    metadata.fr_uniq_id = Some(id);
                }
            }
            Ok(IgcRecord::Ignored(_)) => {}
            Err(e) => warn!("skipping line {}: {}", i+1, e)
        }
    }

    if !i_records.is_empty() { metadata.i_record = Some( i_records.join(" ")) }

    let date = metadata.date.ok_or( OdinIgcError::MissingDate)?;
    let fixes = timestamp_fixes( date, &raw_fixes);
    debug!("read {} fixes for {}", fixes.len(), date);

    Ok( IgcLog { metadata, fixes })
}

fn set_header_field (metadata: &mut FlightMetadata, field: HeaderField) {
    match field {
        HeaderField::Date(d) => metadata.date = Some(d),
        HeaderField::Pilot(s) => metadata.pilot = Some(s),
        HeaderField::GliderType(s) => metadata.glider_type = Some(s),
        HeaderField::CompetitionClass(s) => metadata.competition_class = Some(s),
        HeaderField::FirmwareVersion(s) => metadata.fr_firmware_version = Some(s),
        HeaderField::HardwareVersion(s) => metadata.fr_hardware_version = Some(s),
        HeaderField::RecorderType(s) => metadata.fr_recorder_type = Some(s),
        HeaderField::GpsReceiver(s) => metadata.fr_gps_receiver = Some(s),
        HeaderField::PressureSensor(s) => metadata.fr_pressure_sensor = Some(s),
        HeaderField::Other(_) => {}
    }
}

fn timestamp_fixes (date: NaiveDate, raw_fixes: &[RawFix])->Vec<Fix> {
    let mut fixes = Vec::with_capacity( raw_fixes.len());
    let mut days: i64 = 0;
    let mut prev: Option<i64> = None;

    for rf in raw_fixes {
        let mut t = rf.secs_of_day as i64 + days * SECS_PER_DAY;
        if let Some(p) = prev {
            if p > t && t + SECS_PER_DAY < p + 200 {
                days += 1;
                t += SECS_PER_DAY;
            }
        }
        prev = Some(t);

        fixes.push( Fix::new( utc_datetime_from_secs_of_day( date, t), rf.lat, rf.lon, rf.gnss_alt, rf.press_alt));
    }

    if days > 0 { debug!("{} UTC midnight crossings", days) }
    fixes
}
