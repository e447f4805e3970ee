pub mod block;
pub mod logo;
pub mod template;
