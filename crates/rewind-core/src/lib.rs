pub mod collab;
pub mod config;
pub mod consts;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod io;
pub mod operation;
pub mod raster;
pub mod replay;
pub mod transform;
pub mod view;
