mod common;

mod recommendation;
