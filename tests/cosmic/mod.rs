mod earth_orientation;
mod ephemeris;
