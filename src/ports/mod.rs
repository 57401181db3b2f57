mod native_image_picker;

pub use native_image_picker::NativeImagePicker;
