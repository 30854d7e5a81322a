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

 use thiserror::Error;

 pub type Result<T> = std::result::Result<T,OdinIgcError>;


#[derive(Error,Debug)]
pub enum OdinIgcError {

    #[error("parse error {0}")]
    ParseError(String),

    #[error("no date header record (HFDTE)")]
    MissingDate,

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config error {0}")]
    ConfigError( #[from] ron::error::SpannedError),

    #[error("XML error {0}")]
    XmlError( #[from] quick_xml::de::DeError),

    #[error("chrono parse error {0}")]
    ChronoParseError( #[from] chrono::ParseError),
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinIgcError::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;
