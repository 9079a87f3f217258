mod cli;
mod image;
