mod cart;
mod order;
mod product;
mod subscription;
mod trade;
mod user;
