mod boundary;
mod member;
