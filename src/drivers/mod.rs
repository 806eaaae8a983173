pub mod haptic;
