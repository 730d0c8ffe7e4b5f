pub mod mask_coordinates;
