mod view_model;

pub use view_model::CameraViewModel;
