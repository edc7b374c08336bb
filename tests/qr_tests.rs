#[cfg(test)]
mod qr_proptests {

    use image::Rgba;
    use prop::string::string_regex;
    use proptest::prelude::*;

    use qrforge::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn payload_strategy(max_sz: usize) -> impl Strategy<Value = (ECLevel, String)> {
        ec_level_strategy().prop_flat_map(move |ecl| {
            let pattern = format!(r"[ -~]{{1,{}}}", max_sz);
            string_regex(&pattern).unwrap().prop_map(move |data| (ecl, data))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn proptest_printable(params in payload_strategy(300)) {
            let (ecl, data) = params;

            let symbol = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            prop_assert!(symbol.ec_level() >= ecl);
            prop_assert_eq!(symbol.width(), *symbol.version() * 4 + 17);

            let again = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            prop_assert_eq!(symbol.matrix(), again.matrix());
            prop_assert_eq!(symbol.mask(), again.mask());
        }

        #[test]
        fn proptest_render(params in payload_strategy(120), dimensions in 1u32..400) {
            let (ecl, data) = params;

            let bg = Rgba([255, 255, 255, 0]);
            let fg = Rgba([0, 0, 0, 255]);
            let img = encode(data.as_bytes(), ecl, dimensions, 4, bg, fg).unwrap();
            prop_assert_eq!(img.dimensions(), (dimensions, dimensions));
            prop_assert!(img.pixels().all(|p| *p == bg || *p == fg));
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use image::Rgba;
    use test_case::test_case;

    use qrforge::{encode, encode_image, ECLevel, ImageFormat, QRBuilder, QRError, TemplateCache, Version};

    const BG: Rgba<u8> = Rgba([255, 255, 255, 0]);
    const FG: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn test_scenario_test_123() {
        let img = encode(b"TEST 123", ECLevel::L, 100, 4, BG, FG).unwrap();
        assert_eq!(img.dimensions(), (100, 100));

        // 29 modules over 100 pixels leaves at least 11 pixels of quiet zone
        for i in 0..100 {
            for j in 0..11 {
                assert_eq!(*img.get_pixel(i, j), BG);
                assert_eq!(*img.get_pixel(j, i), BG);
                assert_eq!(*img.get_pixel(99 - j, i), BG);
                assert_eq!(*img.get_pixel(i, 99 - j), BG);
            }
        }
        assert!(img.pixels().any(|p| *p == FG));

        let symbol = QRBuilder::new(b"TEST 123").build().unwrap();
        assert_eq!(*symbol.version(), 1);
        assert_eq!(symbol.width(), 21);
    }

    #[test]
    fn test_scenario_too_long() {
        let data = "x".repeat(3000);
        let res = encode(data.as_bytes(), ECLevel::H, 100, 4, BG, FG);
        assert_eq!(res.unwrap_err(), QRError::DataTooLong);
    }

    #[test_case(b"\x00".to_vec(); "nul only")]
    #[test_case(b"TEST\x00123".to_vec(); "embedded nul")]
    #[test_case(b"line\nbreak".to_vec(); "newline")]
    #[test_case("naïve".as_bytes().to_vec(); "utf8")]
    fn test_scenario_invalid_char(data: Vec<u8>) {
        let res = encode(&data, ECLevel::L, 100, 4, BG, FG);
        assert_eq!(res.unwrap_err(), QRError::InvalidChar);
    }

    #[test]
    fn test_empty_payload() {
        let res = encode(b"", ECLevel::L, 100, 4, BG, FG);
        assert_eq!(res.unwrap_err(), QRError::EmptyData);
    }

    #[test_case(2953, ECLevel::L, 40, ECLevel::L; "v40 l full")]
    #[test_case(1273, ECLevel::H, 40, ECLevel::H; "v40 h full")]
    #[test_case(17, ECLevel::L, 1, ECLevel::L; "v1 l full")]
    #[test_case(7, ECLevel::L, 1, ECLevel::H; "v1 upgraded to h")]
    fn test_capacity_limits(len: usize, ecl: ECLevel, exp_v: usize, exp_ecl: ECLevel) {
        let data = "Z".repeat(len);
        let symbol = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
        assert_eq!(*symbol.version(), exp_v);
        assert_eq!(symbol.ec_level(), exp_ecl);
    }

    #[test]
    fn test_one_past_capacity() {
        let data = "Z".repeat(2954);
        let res = QRBuilder::new(data.as_bytes()).ec_level(ECLevel::L).build();
        assert_eq!(res.unwrap_err(), QRError::DataTooLong);
    }

    #[test]
    fn test_cached_templates_deterministic() {
        let v = Version::new(3).unwrap();
        let a = TemplateCache::global().get(v);
        let b = TemplateCache::global().get(v);
        assert_eq!(a.matrix(), b.matrix());

        let data = "Same payload, same symbol";
        let first = QRBuilder::new(data.as_bytes()).ec_level(ECLevel::Q).build().unwrap();
        let second = QRBuilder::new(data.as_bytes()).ec_level(ECLevel::Q).build().unwrap();
        assert_eq!(first.matrix(), second.matrix());
    }

    #[test_case(ImageFormat::Png, b"\x89PNG"; "png")]
    #[test_case(ImageFormat::Jpeg, b"\xff\xd8\xff"; "jpeg")]
    fn test_encode_image(format: ImageFormat, magic: &[u8]) {
        let img = encode(b"https://example.com", ECLevel::M, 240, 4, BG, FG).unwrap();
        let bytes = encode_image(&img, format).unwrap();
        assert!(bytes.starts_with(magic));

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (240, 240));
    }
}
