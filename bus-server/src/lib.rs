//! Bus route directory server.
//!
//! A web application that answers: "which buses stop near where I'm
//! going?", forgiving misspelt stop names along the way.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod matcher;
pub mod web;
