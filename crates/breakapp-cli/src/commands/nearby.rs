use anyhow::Result;
use breakapp_application::VoiceOrderingUseCase;
use breakapp_core::geo::Coordinate;

pub async fn run(
    usecase: &VoiceOrderingUseCase,
    origin: Coordinate,
    radius_km: Option<f64>,
    items: bool,
    json: bool,
) -> Result<()> {
    if items {
        let found = usecase.nearby_menu_items(origin, radius_km).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&found)?);
        } else {
            for item in &found {
                println!(
                    "- {} ({}) {:.2} km",
                    item.item.name,
                    item.item.price,
                    item.display_distance_km()
                );
            }
        }
        return Ok(());
    }

    let found = usecase.nearby_restaurants(origin, radius_km).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        crate::render::restaurants(&found);
    }
    Ok(())
}
