// Geometry export module (ns-export)

mod geometry;
mod params;

pub use geometry::{
    export_gaussian_splat, export_pointcloud, gaussian_splat_args, pointcloud_args,
};
pub use params::PointcloudParams;
