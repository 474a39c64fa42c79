// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod records;
pub mod session;
pub mod storage;
pub mod utils;

pub use error::{Error, Result};
