mod common;

use common::synthetic_image::{bright_line_u8, checkerboard_u8, step_edge_u8};
use edge_detector::controls::{default_panel, extract};
use edge_detector::error::FilterError;
use edge_detector::filters::FilterId;
use edge_detector::image::RasterU8;
use edge_detector::params::{ParamSet, ParamSetBuilder, ParamValue};
use edge_detector::pipeline::FilterPipeline;

fn gray(width: usize, height: usize, data: Vec<u8>) -> RasterU8 {
    RasterU8::from_raw(width, height, 1, data).expect("consistent test buffer")
}

/// Default parameters for `id`, obtained the way the UI would: build the
/// filter's default control panel and extract it.
fn default_params(pipeline: &FilterPipeline, id: FilterId) -> ParamSet {
    let spec = pipeline.registry().resolve_id(id).expect("builtin filter");
    extract(&default_panel(spec), spec).expect("default panel extracts")
}

#[test]
fn unknown_filter_is_rejected() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(16, 16, vec![0; 256]);
    let err = pipeline
        .run("nonexistent", &raster, &ParamSet::empty())
        .unwrap_err();
    assert!(matches!(err, FilterError::UnknownFilter { ref name } if name == "nonexistent"));
}

#[test]
fn sobel_localizes_a_vertical_step_edge() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(100, 100, step_edge_u8(100, 100, 50));
    let spec = pipeline.registry().resolve("sobel").unwrap();
    let params = ParamSetBuilder::new(spec.schema())
        .set("direction", ParamValue::Choice("combined".into()))
        .unwrap()
        .set("kernel_size", ParamValue::Int(3))
        .unwrap()
        .build()
        .unwrap();

    let out = pipeline.run("sobel", &raster, &params).unwrap();
    assert_eq!((out.width(), out.height(), out.channels()), (100, 100, 1));
    // Bright ridge at the step, exact zeros away from it.
    assert!(out.sample(50, 50, 0) > 200, "step column should be bright");
    assert_eq!(out.sample(10, 50, 0), 0);
    assert_eq!(out.sample(90, 50, 0), 0);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(64, 64, checkerboard_u8(64, 64, 8));
    for id in [FilterId::Sobel, FilterId::Canny, FilterId::Sato] {
        let params = default_params(&pipeline, id);
        let first = pipeline.run(id.as_str(), &raster, &params).unwrap();
        let second = pipeline.run(id.as_str(), &raster, &params).unwrap();
        assert_eq!(first, second, "{id}");
    }
}

#[test]
fn every_filter_maps_a_blank_image_to_a_blank_output() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(100, 100, vec![0; 100 * 100]);
    for id in FilterId::ALL {
        let params = default_params(&pipeline, id);
        let out = pipeline.run(id.as_str(), &raster, &params).unwrap();
        assert_eq!((out.width(), out.height(), out.channels()), (100, 100, 1));
        assert!(
            out.data().iter().all(|&v| v == 0),
            "{id} produced spurious edges on a blank image"
        );
    }
}

#[test]
fn every_direction_is_accepted_for_the_gradient_family() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(48, 48, step_edge_u8(48, 48, 24));
    for id in [
        FilterId::Sobel,
        FilterId::Scharr,
        FilterId::Prewitt,
        FilterId::Farid,
    ] {
        let spec = pipeline.registry().resolve_id(id).unwrap();
        for direction in ["combined", "vertical", "horizontal"] {
            let mut builder = ParamSetBuilder::new(spec.schema())
                .set("direction", ParamValue::Choice(direction.into()))
                .unwrap();
            if id == FilterId::Sobel {
                builder = builder.set("kernel_size", ParamValue::Int(5)).unwrap();
            }
            let params = builder.build().unwrap();
            let out = pipeline.run(id.as_str(), &raster, &params).unwrap();
            assert_eq!(out.channels(), 1, "{id}/{direction}");
        }
    }
}

#[test]
fn non_enumerated_direction_is_a_typed_failure() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(48, 48, step_edge_u8(48, 48, 24));
    for id in [
        FilterId::Sobel,
        FilterId::Scharr,
        FilterId::Prewitt,
        FilterId::Farid,
    ] {
        let mut entries = vec![(
            "direction".to_string(),
            ParamValue::Choice("diagonal".to_string()),
        )];
        if id == FilterId::Sobel {
            entries.push(("kernel_size".to_string(), ParamValue::Int(3)));
        }
        let params = ParamSet::from_entries(entries);
        let err = pipeline.run(id.as_str(), &raster, &params).unwrap_err();
        assert!(
            matches!(err, FilterError::InvalidParameter { ref name, .. } if name == "direction"),
            "{id}"
        );
    }
}

#[test]
fn canny_edge_count_is_monotone_in_the_low_threshold() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(64, 64, checkerboard_u8(64, 64, 8));
    let spec = pipeline.registry().resolve("canny").unwrap();

    let mut previous = usize::MAX;
    for low in [0.1, 0.3, 0.5, 0.7] {
        let params = ParamSetBuilder::new(spec.schema())
            .set("threshold1", ParamValue::Float(low))
            .unwrap()
            .set("threshold2", ParamValue::Float(0.9))
            .unwrap()
            .set("sigma", ParamValue::Float(1.0))
            .unwrap()
            .build()
            .unwrap();
        let out = pipeline.run("canny", &raster, &params).unwrap();
        let count = out.data().iter().filter(|&&v| v == 255).count();
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));
        assert!(
            count <= previous,
            "edge count grew from {previous} to {count} at low quantile {low}"
        );
        previous = count;
    }
}

#[test]
fn inverted_canny_thresholds_are_rejected() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(32, 32, checkerboard_u8(32, 32, 8));
    let params = ParamSet::from_entries(vec![
        ("threshold1".to_string(), ParamValue::Float(0.9)),
        ("threshold2".to_string(), ParamValue::Float(0.1)),
        ("sigma".to_string(), ParamValue::Float(1.0)),
    ]);
    let err = pipeline.run("canny", &raster, &params).unwrap_err();
    assert!(matches!(
        err,
        FilterError::InvalidParameter { ref name, .. } if name == "threshold1"
    ));
}

#[test]
fn extracted_sets_carry_exactly_the_schema_keys() {
    let pipeline = FilterPipeline::with_builtin_filters();
    for id in FilterId::ALL {
        let spec = pipeline.registry().resolve_id(id).unwrap();
        let params = extract(&default_panel(spec), spec).unwrap();
        let declared: Vec<&str> = spec.schema().iter().map(|s| s.name).collect();
        assert_eq!(params.names(), declared, "{id}");
    }
}

#[test]
fn color_input_goes_through_grayscale_conversion() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let gray_data = step_edge_u8(48, 48, 24);
    let mut rgb_data = Vec::with_capacity(gray_data.len() * 3);
    for v in &gray_data {
        rgb_data.extend_from_slice(&[*v, *v, *v]);
    }
    let rgb = RasterU8::from_raw(48, 48, 3, rgb_data).unwrap();

    let params = default_params(&pipeline, FilterId::Scharr);
    let out = pipeline.run("scharr", &rgb, &params).unwrap();
    assert_eq!(out.channels(), 1);
    assert!(out.sample(24, 24, 0) > 200);
}

#[test]
fn ridge_filters_highlight_a_bright_line() {
    let pipeline = FilterPipeline::with_builtin_filters();
    let raster = gray(64, 64, bright_line_u8(64, 64, 32));
    for id in [FilterId::Sato, FilterId::Meijering, FilterId::Hessian] {
        let spec = pipeline.registry().resolve_id(id).unwrap();
        let params = ParamSetBuilder::new(spec.schema())
            .set("sigmas", ParamValue::Int(3))
            .unwrap()
            .set("black_ridges", ParamValue::Bool(false))
            .unwrap()
            .build()
            .unwrap();
        let out = pipeline.run(id.as_str(), &raster, &params).unwrap();
        let line_value = out.sample(32, 32, 0);
        let far_value = out.sample(32, 8, 0);
        assert!(
            line_value > far_value,
            "{id}: line {line_value} vs background {far_value}"
        );
    }
}
