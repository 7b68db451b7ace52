pub mod pages;
pub mod restart;
pub mod vcs;
