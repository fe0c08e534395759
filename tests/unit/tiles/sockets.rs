//! Tests for socket signatures, rotation of socket arrays and labels

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use wavetile::io::configuration::SOCKET_HASH_MULTIPLIER;
    use wavetile::tiles::sockets::{
        Edge, Signature, SocketLabels, derive_sockets, normalize_sample_points, pixel_value,
        rotate_sockets, rotate_sockets_by,
    };

    fn sockets(values: [i32; 4]) -> [Signature; 4] {
        values.map(Signature)
    }

    // Tests one clockwise turn moves the left signature to the top
    // Verified by shifting the array in the opposite direction
    #[test]
    fn test_rotate_once() {
        let rotated = rotate_sockets(&sockets([1, 2, 3, 4]));
        assert_eq!(rotated, sockets([4, 1, 2, 3]));
    }

    // Tests four turns reproduce the original signatures for several arrays
    // Verified by rotating by three positions per turn
    #[test]
    fn test_rotation_closure() {
        for values in [[1, 2, 3, 4], [7, 7, 7, 7], [-5, 0, i32::MAX, i32::MIN]] {
            let original = sockets(values);
            let mut rotated = original;
            for _ in 0..4 {
                rotated = rotate_sockets(&rotated);
            }
            assert_eq!(rotated, original);
            assert_eq!(rotate_sockets_by(&original, 4), original);
            assert_eq!(rotate_sockets_by(&original, 6), rotate_sockets_by(&original, 2));
        }
    }

    // Tests opposite edges and neighbor offsets
    // Verified by mapping Top to Left
    #[test]
    fn test_edge_geometry() {
        assert_eq!(Edge::Top.opposite(), Edge::Bottom);
        assert_eq!(Edge::Right.opposite(), Edge::Left);
        assert_eq!(Edge::Bottom.opposite(), Edge::Top);
        assert_eq!(Edge::Left.opposite(), Edge::Right);

        assert_eq!(Edge::Top.offset(), (0, -1));
        assert_eq!(Edge::Right.offset(), (1, 0));
        assert_eq!(Edge::Bottom.offset(), (0, 1));
        assert_eq!(Edge::Left.offset(), (-1, 0));

        for (index, edge) in Edge::ALL.iter().enumerate() {
            assert_eq!(edge.index(), index);
            assert_eq!(*edge.select(&[0, 1, 2, 3]), index);
        }
    }

    // Tests edge names and indices parse
    // Verified by swapping the right and left arms
    #[test]
    fn test_edge_from_str() {
        assert_eq!("top".parse::<Edge>(), Ok(Edge::Top));
        assert_eq!("Right".parse::<Edge>(), Ok(Edge::Right));
        assert_eq!("2".parse::<Edge>(), Ok(Edge::Bottom));
        assert_eq!("3".parse::<Edge>(), Ok(Edge::Left));
        assert!("up".parse::<Edge>().is_err());
    }

    // Tests pixels pack as ARGB
    // Verified by packing as RGBA
    #[test]
    fn test_pixel_value_is_argb() {
        assert_eq!(pixel_value([0, 0, 0, 0]), 0);
        assert_eq!(pixel_value([0x12, 0x34, 0x56, 0x00]), 0x0012_3456);
        assert_eq!(pixel_value([255, 0, 0, 255]), -65_536);
    }

    // Tests negative offsets wrap around and the result is sorted
    // Verified by removing the sort
    #[test]
    fn test_normalize_sample_points() {
        assert_eq!(normalize_sample_points(&[10, -1, 3], 16), vec![3, 10, 15]);
        assert_eq!(normalize_sample_points(&[16, -16], 16), vec![0, 0]);
        assert_eq!(normalize_sample_points(&[], 16), Vec::<u32>::new());
    }

    // Tests a uniform tile yields equal signatures on all edges
    // Verified by sampling the right edge at column zero
    #[test]
    fn test_uniform_tile_signatures() {
        let color = [10, 20, 30, 255];
        let tile = RgbaImage::from_pixel(3, 3, Rgba(color));
        let derived = derive_sockets(&tile, &[0, 1, 2]);

        let value = pixel_value(color);
        let mut expected = 0i32;
        for _ in 0..3 {
            expected = expected
                .wrapping_mul(SOCKET_HASH_MULTIPLIER)
                .wrapping_add(value);
        }
        assert_eq!(derived, [Signature(expected); 4]);
    }

    // Tests each edge samples its own border
    // Verified by sampling the bottom edge at row zero
    #[test]
    fn test_edges_sample_their_border() {
        let mut tile = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]));
        for x in 0..3 {
            tile.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
        }
        let [top, right, bottom, left] = derive_sockets(&tile, &[0, 1, 2]);

        assert_ne!(top, bottom);
        assert_eq!(left, right);
        assert_ne!(left, top);
        assert_ne!(left, bottom);
    }

    // Tests identical pixels always give identical signatures
    // Verified by seeding the accumulator with the sample count
    #[test]
    fn test_derivation_is_deterministic() {
        let tile = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 40, y as u8 * 40, 7, 255]));
        let points = normalize_sample_points(&[1, -1], 4);
        assert_eq!(derive_sockets(&tile, &points), derive_sockets(&tile, &points));
    }

    // Tests missing labels default to the decimal signature and are remembered
    // Verified by returning the label without inserting it
    #[test]
    fn test_label_get_or_insert() {
        let mut labels = SocketLabels::new();
        assert!(labels.is_empty());

        assert_eq!(labels.label(Signature(-42)), "-42");
        assert_eq!(labels.len(), 1);

        labels.insert(Signature(5), "pipe");
        assert_eq!(labels.label(Signature(5)), "pipe");
        assert_eq!(labels.len(), 2);
    }

    // Tests formatting uses labels in the given order
    // Verified by sorting signatures before formatting
    #[test]
    fn test_format_labels() {
        let mut labels = SocketLabels::new();
        labels.insert(Signature(1), "a");
        assert_eq!(labels.format([Signature(2), Signature(1)]), "[2,a]");
        assert_eq!(labels.format(sockets([1, 1, 3, 4])), "[a,a,3,4]");
    }
}
