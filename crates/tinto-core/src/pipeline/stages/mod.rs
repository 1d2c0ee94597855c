mod blur;
mod brightness;
mod contrast;
mod saturation;
mod sharpness;

pub use blur::Blur;
pub use brightness::Brightness;
pub use contrast::Contrast;
pub use saturation::Saturation;
pub use sharpness::Sharpness;
