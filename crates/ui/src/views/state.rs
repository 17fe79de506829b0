use tutor_core::model::ImageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    UnreadableFile,
    UnsupportedImage,
    ImageTooLarge,
    EmptyImage,
}

impl ViewError {
    #[must_use]
    pub fn from_image(err: &ImageError) -> Self {
        match err {
            ImageError::Empty => Self::EmptyImage,
            ImageError::TooLarge { .. } => Self::ImageTooLarge,
            ImageError::UnsupportedMediaType(_) => Self::UnsupportedImage,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "出错了，请再试一次。",
            Self::UnreadableFile => "读取图片失败，请重新选择。",
            Self::UnsupportedImage => "只支持 JPG、PNG、WEBP 或 HEIC 格式的图片。",
            Self::ImageTooLarge => "图片太大了，请换一张小于 20MB 的图片。",
            Self::EmptyImage => "这张图片是空的，请重新选择。",
        }
    }
}
