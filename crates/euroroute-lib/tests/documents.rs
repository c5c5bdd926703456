use std::fs;
use std::path::Path;

use euroroute_lib::documents::{
    render_route_map, write_all_timetables, write_analysis_workbook, write_pricing_workbook,
    write_route_timetable, AnalysisStats,
};
use euroroute_lib::{City, OutputLayout, PriceQuote, Route};

fn routes() -> Vec<Route> {
    let paris = City::new("Paris", "France", 48.8566, 2.3522);
    vec![
        Route::between("EUR_001", paris.clone(), City::new("Lyon", "France", 45.764, 4.8357))
            .expect("distinct"),
        Route::between("EUR_002", paris, City::new("Berlin", "Germany", 52.52, 13.405))
            .expect("distinct"),
    ]
}

fn assert_xlsx(path: &Path) {
    let bytes = fs::read(path).expect("workbook readable");
    assert!(bytes.len() > 100, "workbook {} too small", path.display());
    assert_eq!(&bytes[..2], b"PK", "xlsx files are zip containers");
}

#[test]
fn route_timetable_is_a_workbook() {
    let dir = tempfile::tempdir().expect("temp dir");
    let layout = OutputLayout::new(dir.path());
    let route = &routes()[0];
    let path = write_route_timetable(route, &layout.route_timetable(&route.id))
        .expect("timetable written");
    assert!(path.ends_with("timetables/EUR_001_timetable.xlsx"));
    assert_xlsx(&path);
}

#[test]
fn combined_timetables_have_one_sheet_per_route() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("all_timetables.xlsx");
    let sheets = write_all_timetables(&routes(), &path).expect("written");
    assert_eq!(sheets, vec!["Route_EUR_001", "Route_EUR_002"]);
    assert_xlsx(&path);
}

#[test]
fn reports_are_workbooks() {
    let dir = tempfile::tempdir().expect("temp dir");
    let layout = OutputLayout::new(dir.path());
    let routes = routes();
    let stats = AnalysisStats {
        countries: 2,
        cities: 3,
        routes_generated: 2,
        routes_processed: 2,
        generated_at: "2024-05-01 09:30".to_string(),
    };
    let analysis =
        write_analysis_workbook(&stats, &routes, &layout.analysis_report()).expect("analysis");
    assert_xlsx(&analysis);

    let quotes = routes.iter().map(PriceQuote::for_route).collect::<Vec<_>>();
    let pricing = write_pricing_workbook(&quotes, &stats.generated_at, &layout.pricing_report())
        .expect("pricing");
    assert!(pricing.ends_with("pricing/european_pricing_analysis.xlsx"));
    assert_xlsx(&pricing);
}

#[test]
fn map_embeds_route_details() {
    let html = render_route_map(&routes()[1]).expect("map renders");
    assert!(html.contains("leaflet"));
    assert!(html.contains("Berlin"));
    assert!(html.contains("877.5"));
}
