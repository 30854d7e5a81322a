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

/// this module provides great circle computations on a spherical earth model, which is what
/// track analysis (ground speed, bearing, track length) needs. We follow the odin-rs principle of using
/// existing crates, i.e. [`GeoPoint`] is a new type around a [geo](https://docs.rs/geo/latest/geo/index.html) `Point`
/// and the computations are those of the `geo` Haversine metric space. All public angles are in degrees,
/// lengths are either `uom` values or explicitly suffixed `_meters`.
/// Haversine distances differ from ellipsoid (geodesic) distances by up to ~0.5%

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Bearing, Destination, Distance, Haversine, Point};
use uom::si::f64::Length;
use uom::si::length::meter;

use crate::angle::{normalize_180, normalize_90};

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees (x: longitude, y: latitude)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from="LatLon", into="LatLon")]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lat_lon_degrees (lat: f64, lon: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    #[inline] pub fn latitude_degrees (&self)->f64 { self.0.y() }
    #[inline] pub fn longitude_degrees (&self)->f64 { self.0.x() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }

    /// great circle distance to another point
    pub fn distance_to (&self, other: &GeoPoint) -> Length {
        Length::new::<meter>( self.distance_meters_to( other))
    }

    pub fn distance_meters_to (&self, other: &GeoPoint) -> f64 {
        Haversine.distance( self.0, other.0)
    }

    /// initial great circle bearing towards `other` in degrees (-180,180], 0 is north, 90 is east
    /// note this is 0 for identical points
    pub fn bearing_to (&self, other: &GeoPoint) -> f64 {
        if self.0 == other.0 { 0.0 } else { normalize_180( Haversine.bearing( self.0, other.0)) }
    }

    /// the point reached when travelling `dist_meters` along the great circle that starts with `bearing` degrees
    pub fn destination (&self, bearing: f64, dist_meters: f64) -> GeoPoint {
        let p = Haversine.destination( self.0, bearing, dist_meters);
        GeoPoint::from_lat_lon_degrees( p.y(), p.x())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5}]", self.latitude_degrees(), self.longitude_degrees())
    }
}

// the serialized form. We accept "lat", "latitude" or "y" for latitude degrees and "lon", "longitude" or "x" for
// longitude degrees, which allows to read data that was serialized by `geo` types
#[derive(Serialize,Deserialize)]
struct LatLon {
    #[serde(alias="latitude", alias="y")]
    lat: f64,
    #[serde(alias="longitude", alias="x")]
    lon: f64
}

impl From<LatLon> for GeoPoint {
    fn from (p: LatLon)->Self { GeoPoint::from_lat_lon_degrees( p.lat, p.lon) }
}

impl From<GeoPoint> for LatLon {
    fn from (p: GeoPoint)->Self { LatLon { lat: p.latitude_degrees(), lon: p.longitude_degrees() } }
}

/* #endregion GeoPoint */

/// cumulative great circle length of a track given as a sequence of points
pub fn track_length<I> (points: I) -> Length where I: IntoIterator<Item=GeoPoint> {
    let mut it = points.into_iter();
    let mut dist = 0.0;

    if let Some(mut last) = it.next() {
        for p in it {
            dist += last.distance_meters_to(&p);
            last = p;
        }
    }
    Length::new::<meter>(dist)
}
