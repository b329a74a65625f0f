//! Bike journey planner server.
//!
//! A web application that answers: "where do I pick up a bike near
//! here, and where do I drop it off near there?", either right now
//! from the live station feed, or at a future time from a trained
//! availability model.

pub mod cache;
pub mod domain;
pub mod geo;
pub mod jcdecaux;
pub mod planner;
pub mod predict;
pub mod weather;
pub mod web;
