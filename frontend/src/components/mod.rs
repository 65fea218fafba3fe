pub mod guest_book;
