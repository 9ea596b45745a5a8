//! Desktop front end for the review prediction form.
pub mod controller;
pub mod state;
pub mod ui;
