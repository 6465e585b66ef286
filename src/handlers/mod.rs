// Handlers are grouped by the access tier the router puts in front of them:
// public (no token), protected (any valid token), elevated (admin token).
pub mod elevated;
pub mod protected;
pub mod public;
pub mod utils;
