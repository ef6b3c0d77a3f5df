//! Default property lists for `querySelectedStatistics`

/// Storage pool properties queried when the caller names none
pub const STORAGE_POOL_STATISTICS: &[&str] = &[
    "backgroundScanFixedReadErrorCount",
    "pendingMovingOutBckRebuildJobs",
    "degradedHealthyCapacityInKb",
    "activeMovingOutFwdRebuildJobs",
    "bckRebuildWriteBwc",
    "netFglUncompressedDataSizeInKb",
    "primaryReadFromDevBwc",
    "BackgroundScannedInMB",
    "volumeIds",
    "maxUserDataCapacityInKb",
    "persistentChecksumBuilderProgress",
    "rfcacheReadsSkippedAlignedSizeTooLarge",
    "pendingMovingInRebalanceJobs",
    "rfcacheWritesSkippedHeavyLoad",
    "unusedCapacityInKb",
    "userDataSdcReadLatency",
    "totalReadBwc",
    "numOfDeviceAtFaultRebuilds",
    "totalWriteBwc",
    "persistentChecksumCapacityInKb",
    "rmPendingAllocatedInKb",
    "numOfVolumes",
    "rfcacheIosOutstanding",
    "capacityAvailableForVolumeAllocationInKb",
    "numOfMappedToAllVolumes",
    "netThinUserDataCapacityInKb",
    "backgroundScanFixedCompareErrorCount",
    "volMigrationWriteBwc",
    "thinAndSnapshotRatio",
    "fglUserDataCapacityInKb",
    "pendingMovingInEnterProtectedMaintenanceModeJobs",
    "activeMovingInNormRebuildJobs",
    "aggregateCompressionLevel",
    "targetOtherLatency",
    "netUserDataCapacityInKb",
    "pendingMovingOutExitProtectedMaintenanceModeJobs",
    "overallUsageRatio",
    "volMigrationReadBwc",
    "netCapacityInUseNoOverheadInKb",
    "pendingMovingInBckRebuildJobs",
    "rfcacheReadsSkippedInternalError",
    "activeBckRebuildCapacityInKb",
    "rebalanceCapacityInKb",
    "pendingMovingInExitProtectedMaintenanceModeJobs",
    "rfcacheReadsSkippedLowResources",
    "rplJournalCapAllowed",
    "thinCapacityInUseInKb",
    "userDataSdcTrimLatency",
    "activeMovingInEnterProtectedMaintenanceModeJobs",
    "rfcacheWritesSkippedInternalError",
    "netUserDataCapacityNoTrimInKb",
    "rfcacheWritesSkippedCacheMiss",
    "degradedFailedCapacityInKb",
    "activeNormRebuildCapacityInKb",
    "fglSparesInKb",
    "snapCapacityInUseInKb",
    "numOfMigratingVolumes",
    "compressionRatio",
    "rfcacheWriteMiss",
    "primaryReadFromRmcacheBwc",
    "migratingVtreeIds",
    "numOfVtrees",
    "userDataCapacityNoTrimInKb",
    "rfacheReadHit",
    "compressedDataCompressionRatio",
    "rplUsedJournalCap",
    "pendingMovingCapacityInKb",
    "numOfSnapshots",
    "pendingFwdRebuildCapacityInKb",
    "tempCapacityInKb",
    "totalFglMigrationSizeInKb",
    "normRebuildCapacityInKb",
    "logWrittenBlocksInKb",
    "primaryWriteBwc",
    "numOfThickBaseVolumes",
    "enterProtectedMaintenanceModeReadBwc",
    "activeRebalanceCapacityInKb",
    "numOfReplicationJournalVolumes",
    "rfcacheReadsSkippedLockIos",
    "unreachableUnusedCapacityInKb",
    "netProvisionedAddressesInKb",
    "trimmedUserDataCapacityInKb",
    "provisionedAddressesInKb",
    "numOfVolumesInDeletion",
    "pendingMovingOutFwdRebuildJobs",
    "maxCapacityInKb",
    "rmPendingThickInKb",
    "protectedCapacityInKb",
    "secondaryWriteBwc",
    "normRebuildReadBwc",
    "thinCapacityAllocatedInKb",
    "netFglUserDataCapacityInKb",
    "metadataOverheadInKb",
    "rebalanceWriteBwc",
    "primaryVacInKb",
    "deviceIds",
    "netSnapshotCapacityInKb",
    "secondaryVacInKb",
    "numOfDevices",
    "rplTotalJournalCap",
    "failedCapacityInKb",
    "netMetadataOverheadInKb",
    "activeMovingOutBckRebuildJobs",
    "rfcacheReadsFromCache",
    "activeMovingOutEnterProtectedMaintenanceModeJobs",
    "enterProtectedMaintenanceModeCapacityInKb",
    "pendingMovingInNormRebuildJobs",
    "failedVacInKb",
    "primaryReadBwc",
    "fglUncompressedDataSizeInKb",
    "fglCompressedDataSizeInKb",
    "pendingRebalanceCapacityInKb",
    "rfcacheAvgReadTime",
    "semiProtectedCapacityInKb",
    "pendingMovingOutEnterProtectedMaintenanceModeJobs",
    "mgUserDdataCcapacityInKb",
    "snapshotCapacityInKb",
    "netMgUserDataCapacityInKb",
    "fwdRebuildReadBwc",
    "rfcacheWritesReceived",
    "netUnusedCapacityInKb",
    "protectedVacInKb",
    "activeMovingRebalanceJobs",
    "bckRebuildCapacityInKb",
    "activeMovingInFwdRebuildJobs",
    "netTrimmedUserDataCapacityInKb",
    "pendingMovingRebalanceJobs",
    "numOfMarkedVolumesForReplication",
    "degradedHealthyVacInKb",
    "semiProtectedVacInKb",
    "userDataReadBwc",
    "pendingBckRebuildCapacityInKb",
    "capacityLimitInKb",
    "vtreeIds",
    "activeMovingCapacityInKb",
    "targetWriteLatency",
    "pendingExitProtectedMaintenanceModeCapacityInKb",
    "rfcacheIosSkipped",
    "userDataWriteBwc",
    "inMaintenanceVacInKb",
    "exitProtectedMaintenanceModeReadBwc",
    "netFglSparesInKb",
    "rfcacheReadsSkipped",
    "activeExitProtectedMaintenanceModeCapacityInKb",
    "activeMovingOutExitProtectedMaintenanceModeJobs",
    "numOfUnmappedVolumes",
    "tempCapacityVacInKb",
    "volumeAddressSpaceInKb",
    "currentFglMigrationSizeInKb",
    "rfcacheWritesSkippedMaxIoSize",
    "netMaxUserDataCapacityInKb",
    "numOfMigratingVtrees",
    "atRestCapacityInKb",
    "rfacheWriteHit",
    "bckRebuildReadBwc",
    "rfcacheSourceDeviceWrites",
    "spareCapacityInKb",
    "enterProtectedMaintenanceModeWriteBwc",
    "rfcacheIoErrors",
    "inaccessibleCapacityInKb",
    "normRebuildWriteBwc",
    "capacityInUseInKb",
    "rebalanceReadBwc",
    "rfcacheReadsSkippedMaxIoSize",
    "activeMovingInExitProtectedMaintenanceModeJobs",
    "secondaryReadFromDevBwc",
    "secondaryReadBwc",
    "rfcacheWritesSkippedStuckIo",
    "secondaryReadFromRmcacheBwc",
    "inMaintenanceCapacityInKb",
    "exposedCapacityInKb",
    "netFglCompressedDataSizeInKb",
    "userDataSdcWriteLatency",
    "inUseVacInKb",
    "fwdRebuildCapacityInKb",
    "thickCapacityInUseInKb",
    "backgroundScanReadErrorCount",
    "activeMovingInRebalanceJobs",
    "migratingVolumeIds",
    "rfcacheWritesSkippedLowResources",
    "capacityInUseNoOverheadInKb",
    "exitProtectedMaintenanceModeWriteBwc",
    "rfcacheSkippedUnlinedWrite",
    "netCapacityInUseInKb",
    "numOfOutgoingMigrations",
    "rfcacheAvgWriteTime",
    "pendingNormRebuildCapacityInKb",
    "pendingMovingOutNormrebuildJobs",
    "rfcacheSourceDeviceReads",
    "rfcacheReadsPending",
    "volumeAllocationLimitInKb",
    "rfcacheReadsSkippedHeavyLoad",
    "fwdRebuildWriteBwc",
    "rfcacheReadMiss",
    "targetReadLatency",
    "userDataCapacityInKb",
    "activeMovingInBckRebuildJobs",
    "movingCapacityInKb",
    "activeEnterProtectedMaintenanceModeCapacityInKb",
    "backgroundScanCompareErrorCount",
    "pendingMovingInFwdRebuildJobs",
    "rfcacheReadsReceived",
    "spSdsIds",
    "pendingEnterProtectedMaintenanceModeCapacityInKb",
    "vtreeAddresSpaceInKb",
    "snapCapacityInUseOccupiedInKb",
    "activeFwdRebuildCapacityInKb",
    "rfcacheReadsSkippedStuckIo",
    "activeMovingOutNormRebuildJobs",
    "rfcacheWritePending",
    "numOfThinBaseVolumes",
    "degradedFailedVacInKb",
    "userDataTrimBwc",
    "numOfIncomingVtreeMigrations",
];

/// Appended to [`STORAGE_POOL_STATISTICS`] on every version but 3.5
pub const STORAGE_POOL_STATISTICS_ABOVE_3_5: &[&str] = &[
    "thinCapacityAllocatedInKm",
    "thinUserDataCapacityInKb",
];

pub const VOLUME_STATISTICS: &[&str] = &[
    "rplUsedJournalCap",
    "replicationState",
    "numOfChildVolumes",
    "userDataWriteBwc",
    "rplTotalJournalCap",
    "initiatorSdcId",
    "userDataSdcReadLatency",
    "userDataSdcTrimLatency",
    "mappedSdcIds",
    "registrationKey",
    "registrationKeys",
    "descendantVolumeIds",
    "numOfMappedSdcs",
    "reservationType",
    "userDataReadBwc",
    "numOfDescendantVolumes",
    "replicationJournalVolume",
    "userDataTrimBwc",
    "childVolumeIds",
    "userDataSdcWriteLatency",
];

/// Replication consistency group properties below 3.6
pub const RCG_STATISTICS: &[&str] = &[
    "rcgLocalReadBwc",
    "initialCopyNumPairs",
    "lagPersistentInMillis",
    "rplRemoteUserBwc",
    "rplApplyLatency",
    "lagReceivedInMillis",
    "nextPlannedCycle",
    "lagPersistentSkew",
    "lastSadBarrierId",
    "readyForTransmit",
    "initialCopyTransmit",
    "rplLocalUserBwc",
    "rplPairIds",
    "numOfRplPairs",
    "rplReceiveLatency",
    "rplLocalApplyBwc",
    "lagAppliedInMillis",
    "lastCsadBarrierId",
    "lastCompletedPeriodicBarrier",
    "lastAppliedBarrierId",
    "rplRemoteApplyBwc",
    "readyForApply",
    "initialCopyApply",
    "lagReceivedSkew",
    "initialCopyProgress",
    "rcgLocalWriteBwc",
    "notReadyForTransmit",
    "rplCgRpoCompliance",
    "notReadyForApply",
    "rplTransmitBwc",
    "lastCradBarrierId",
    "lagAppliedSkew",
    "lastRadBarrierId",
    "rplReceiveBwc",
    "rcgRemoteWriteBwc",
    "rcgRemoteReadBwc",
    "rplTransmitLatency",
];

pub const RCG_STATISTICS_ABOVE_3_5: &[&str] = &[
    "rcgLocalWriteBwc",
    "nextPlannedCycle",
    "rplTransmitLatency",
    "lagReceivedInMillis",
    "rcgRemoteReadBwc",
    "lastCradBarrierId",
    "lagAppliedSkew",
    "readyForApply",
    "rplUsedJournalCapacityDst",
    "rplReceiveBwc",
    "lastSadBarrierId",
    "isInSlimMode",
    "lastRadBarrierId",
    "lastAppliedBarrierId",
    "initialCopyTransmit",
    "initialCopyNumPairs",
    "lagAppliedInMillis",
    "lastCompletedPeriodicBarrier",
    "rplLocalApplyBwc",
    "rcgLocalReadBwc",
    "notReadyForTransmit",
    "rplCgRpoCompliance",
    "freezeTransmit",
    "lagPersistentInMillis",
    "lagReceivedSkew",
    "notReadyForApply",
    "initialCopyApply",
    "rplPairIds",
    "rplLocalUserBwc",
    "numOfRplPairs",
    "rplReceiveLatency",
    "lastCsadBarrierId",
    "rplRemoteApplyBwc",
    "rcgRemoteWriteBwc",
    "initialCopyProgress",
    "lagPersistentSkew",
    "rplSasBarriersBacklogSize",
    "rplTransmitBwc",
    "rplApplyLatency",
    "readyForTransmit",
    "rplRemoteUserBwc",
];

pub const SNAPSHOT_POLICY_STATISTICS: &[&str] = &[
    "autoSnapshotVolIds",
    "expiredButLockedSnapshotsIds",
    "numOfAutoSnapshots",
    "numOfExpiredButLockedSnapshots",
    "numOfSrcVols",
    "srcVolIds",
];
