pub mod presenter;
pub mod waker;

pub use presenter::PixelsPresenter;
pub use waker::EventLoopWaker;
