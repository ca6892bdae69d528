pub mod cart_pole;
pub mod mountain_car;

pub use cart_pole::CartPole;
pub use mountain_car::MountainCar;
