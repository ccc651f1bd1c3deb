mod gravity;
mod variational;
