pub mod answer;
pub mod exam;
pub mod policy;
pub mod question;
pub mod score;
