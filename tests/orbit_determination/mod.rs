mod geos3;
mod kalman;
mod tracking;
