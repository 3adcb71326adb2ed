// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod expr;
pub mod filter;
pub mod logging;
pub mod models;
pub mod pager;
pub mod query;
pub mod render;
pub mod repository;
pub mod utils;
