pub mod float_ext;
