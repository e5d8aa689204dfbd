pub mod answer;
pub mod practice;
pub mod question;
