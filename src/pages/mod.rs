pub(crate) mod login;
pub(crate) mod portal;
pub(crate) mod select;
