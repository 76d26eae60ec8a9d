// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Adjournment, ChannelFallbackPolicy, DomainError, ErrorKind, HearingChannel, HearingOptions,
    NextHearingType, YesNo, adjourned_channel, aggregate_case_channel, is_paper_case,
    resolve_party_channel,
};

fn attending() -> HearingOptions {
    HearingOptions {
        wants_to_attend: Some(YesNo::Yes),
        ..HearingOptions::default()
    }
}

fn resolve(options: &HearingOptions) -> HearingChannel {
    resolve_party_channel(
        options,
        None,
        ChannelFallbackPolicy::FallbackToFaceToFace,
        "appellant",
    )
    .unwrap()
}

#[test]
fn test_telephone_preference_with_number_resolves_telephone() {
    let mut options: HearingOptions = attending();
    options.wants_hearing_type_telephone = Some(YesNo::Yes);
    options.hearing_telephone_number = Some(String::from("07700 900000"));

    assert_eq!(resolve(&options), HearingChannel::Telephone);
}

#[test]
fn test_video_preference_with_email_resolves_video() {
    let mut options: HearingOptions = attending();
    options.wants_hearing_type_video = Some(YesNo::Yes);
    options.hearing_video_email = Some(String::from("jane@example.com"));

    assert_eq!(resolve(&options), HearingChannel::Video);
}

#[test]
fn test_video_beats_telephone() {
    let mut options: HearingOptions = attending();
    options.wants_hearing_type_telephone = Some(YesNo::Yes);
    options.hearing_telephone_number = Some(String::from("07700 900000"));
    options.wants_hearing_type_video = Some(YesNo::Yes);
    options.hearing_video_email = Some(String::from("jane@example.com"));

    assert_eq!(resolve(&options), HearingChannel::Video);
}

#[test]
fn test_face_to_face_preference_always_wins() {
    let mut options: HearingOptions = attending();
    options.wants_hearing_type_telephone = Some(YesNo::Yes);
    options.hearing_telephone_number = Some(String::from("07700 900000"));
    options.wants_hearing_type_video = Some(YesNo::Yes);
    options.hearing_video_email = Some(String::from("jane@example.com"));
    options.wants_hearing_type_face_to_face = Some(YesNo::Yes);

    assert_eq!(resolve(&options), HearingChannel::FaceToFace);
}

#[test]
fn test_video_without_email_falls_through_to_face_to_face() {
    let mut options: HearingOptions = attending();
    options.wants_hearing_type_video = Some(YesNo::Yes);
    options.hearing_video_email = Some(String::from("   "));

    let result: Result<HearingChannel, DomainError> = resolve_party_channel(
        &options,
        None,
        ChannelFallbackPolicy::RaiseResolutionError,
        "appellant",
    );

    // A sub-preference was answered, so the raise policy does not apply
    assert_eq!(result, Ok(HearingChannel::FaceToFace));
}

#[test]
fn test_not_attending_beats_preferences() {
    let mut options: HearingOptions = attending();
    options.wants_to_attend = Some(YesNo::No);
    options.wants_hearing_type_face_to_face = Some(YesNo::Yes);

    assert_eq!(resolve(&options), HearingChannel::NotAttending);
}

#[test]
fn test_no_preference_data_resolves_paper() {
    assert_eq!(resolve(&HearingOptions::default()), HearingChannel::Paper);
}

#[test]
fn test_override_channel_wins() {
    let mut options: HearingOptions = attending();
    options.wants_hearing_type_face_to_face = Some(YesNo::Yes);

    let result: Result<HearingChannel, DomainError> = resolve_party_channel(
        &options,
        Some(HearingChannel::Telephone),
        ChannelFallbackPolicy::RaiseResolutionError,
        "appellant",
    );

    assert_eq!(result, Ok(HearingChannel::Telephone));
}

#[test]
fn test_fallback_policy_defaults_to_face_to_face() {
    let result: Result<HearingChannel, DomainError> = resolve_party_channel(
        &attending(),
        None,
        ChannelFallbackPolicy::FallbackToFaceToFace,
        "appellant",
    );

    assert_eq!(result, Ok(HearingChannel::FaceToFace));
}

#[test]
fn test_raise_policy_rejects_missing_preferences() {
    let result: Result<HearingChannel, DomainError> = resolve_party_channel(
        &attending(),
        None,
        ChannelFallbackPolicy::RaiseResolutionError,
        "appellant",
    );

    assert!(matches!(
        result,
        Err(DomainError::ChannelPreferencesMissing { ref party }) if party == "appellant"
    ));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Listing);
}

#[test]
fn test_policy_parses_from_cli_values() {
    assert_eq!(
        "raise".parse::<ChannelFallbackPolicy>(),
        Ok(ChannelFallbackPolicy::RaiseResolutionError)
    );
    assert_eq!(
        "fallback".parse::<ChannelFallbackPolicy>(),
        Ok(ChannelFallbackPolicy::FallbackToFaceToFace)
    );
    assert!("sometimes".parse::<ChannelFallbackPolicy>().is_err());
}

#[test]
fn test_any_face_to_face_party_makes_case_face_to_face() {
    let channels: Vec<HearingChannel> = aggregate_case_channel([
        HearingChannel::Telephone,
        HearingChannel::NotAttending,
        HearingChannel::FaceToFace,
        HearingChannel::Video,
    ]);

    assert_eq!(channels, vec![HearingChannel::FaceToFace]);
}

#[test]
fn test_case_channel_takes_highest_ranked_party() {
    let channels: Vec<HearingChannel> =
        aggregate_case_channel([HearingChannel::Telephone, HearingChannel::Video]);

    assert_eq!(channels, vec![HearingChannel::Video]);
}

#[test]
fn test_case_without_attendees_is_paper() {
    let channels: Vec<HearingChannel> =
        aggregate_case_channel([HearingChannel::NotAttending, HearingChannel::Paper]);

    assert_eq!(channels, vec![HearingChannel::Paper]);
    assert!(is_paper_case(&channels));
    assert_eq!(
        aggregate_case_channel(Vec::<HearingChannel>::new()),
        vec![HearingChannel::Paper]
    );
}

#[test]
fn test_adjourned_channel_requires_flag_and_progress() {
    let adjournment: Adjournment = Adjournment {
        in_progress: true,
        next_hearing_type: Some(NextHearingType::Video),
        ..Adjournment::default()
    };

    assert_eq!(
        adjourned_channel(&adjournment, true),
        Some(HearingChannel::Video)
    );
    assert_eq!(adjourned_channel(&adjournment, false), None);

    let finished: Adjournment = Adjournment {
        in_progress: false,
        ..adjournment
    };
    assert_eq!(adjourned_channel(&finished, true), None);
}

#[test]
fn test_channel_codes_round_trip_through_wire_names() {
    assert_eq!("INTER".parse::<HearingChannel>(), Ok(HearingChannel::FaceToFace));
    assert_eq!(HearingChannel::Paper.to_string(), "ONPPRS");
    assert!(matches!(
        "SMOKE".parse::<HearingChannel>(),
        Err(DomainError::InvalidChannelCode(_))
    ));
}
