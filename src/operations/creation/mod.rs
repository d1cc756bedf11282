mod make_rect;

pub use make_rect::MakeRect;
