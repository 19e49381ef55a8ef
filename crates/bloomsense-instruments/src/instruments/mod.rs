pub mod mchat_rf;
