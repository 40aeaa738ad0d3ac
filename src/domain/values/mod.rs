pub mod commodity;
pub mod identifier;
