mod common;
mod overview;
