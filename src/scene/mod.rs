pub mod family;
pub mod node;
pub mod resolve;
pub mod shapes;
